//! Unit tests for lenient workflow parsing

use serde_json::json;
use wickping::models::{BlockType, LogicalOperator, Workflow};

#[test]
fn test_workflow_parses_builder_document() {
    let workflow: Workflow = serde_json::from_value(json!({
        "rootGroup": {
            "id": "root",
            "type": "AND",
            "blocks": [
                {"id": "b1", "type": "indicator", "content": "Moving Average",
                 "config": {"symbol": "btcusdt", "condition": "price_above_ma"}}
            ],
            "groups": [
                {"id": "g1", "type": "or", "blocks": [
                    {"id": "b2", "type": "social", "content": "Twitter"}
                ]}
            ]
        }
    }))
    .unwrap();

    let root = workflow.root_group.as_ref().unwrap();
    assert_eq!(root.id, "root");
    assert_eq!(root.operator, LogicalOperator::AND);
    assert_eq!(root.blocks[0].block_type, BlockType::Indicator);
    assert_eq!(root.blocks[0].symbol().as_deref(), Some("BTCUSDT"));
    assert_eq!(root.groups[0].operator, LogicalOperator::OR);
    assert_eq!(root.groups[0].blocks[0].block_type, BlockType::Social);
    assert_eq!(root.child_count(), 2);
}

#[test]
fn test_workflow_without_root_group() {
    let empty: Workflow = serde_json::from_value(json!({})).unwrap();
    assert!(empty.root_group.is_none());

    let null_root: Workflow = serde_json::from_value(json!({"rootGroup": null})).unwrap();
    assert!(null_root.root_group.is_none());

    let not_object: Workflow = serde_json::from_value(json!("workflow")).unwrap();
    assert!(not_object.root_group.is_none());
}

#[test]
fn test_group_missing_lists_are_empty() {
    let workflow: Workflow =
        serde_json::from_value(json!({"rootGroup": {"id": "root", "type": "OR"}})).unwrap();
    let root = workflow.root_group.unwrap();
    assert!(root.blocks.is_empty());
    assert!(root.groups.is_empty());
    assert!(!root.is_malformed());
}

#[test]
fn test_group_type_is_case_insensitive_and_defaults_to_and() {
    assert_eq!(LogicalOperator::parse("or"), LogicalOperator::OR);
    assert_eq!(LogicalOperator::parse(" Or "), LogicalOperator::OR);
    assert_eq!(LogicalOperator::parse("and"), LogicalOperator::AND);
    assert_eq!(LogicalOperator::parse("XOR"), LogicalOperator::AND);
    assert_eq!(LogicalOperator::parse(""), LogicalOperator::AND);

    let workflow: Workflow =
        serde_json::from_value(json!({"rootGroup": {"id": "root"}})).unwrap();
    assert_eq!(workflow.root_group.unwrap().operator, LogicalOperator::AND);
}

#[test]
fn test_operator_combine_vacuous_cases() {
    assert!(LogicalOperator::AND.combine(&[]));
    assert!(!LogicalOperator::OR.combine(&[]));
    assert!(!LogicalOperator::AND.combine(&[true, false]));
    assert!(LogicalOperator::OR.combine(&[false, true]));
}

#[test]
fn test_group_with_non_list_blocks_is_malformed() {
    let workflow: Workflow = serde_json::from_value(json!({
        "rootGroup": {"id": "root", "type": "AND", "blocks": "oops"}
    }))
    .unwrap();
    let root = workflow.root_group.unwrap();
    assert!(root.is_malformed());
    assert_eq!(root.id, "root");
}

#[test]
fn test_block_content_falls_back_to_config() {
    let workflow: Workflow = serde_json::from_value(json!({
        "rootGroup": {"id": "root", "blocks": [
            {"id": 7, "type": "Indicator", "config": {"content": "Moving Average"}},
            {"id": "b2", "type": "weather"},
            42
        ]}
    }))
    .unwrap();
    let blocks = &workflow.root_group.as_ref().unwrap().blocks;
    assert_eq!(blocks[0].id, "7");
    assert_eq!(blocks[0].block_type, BlockType::Indicator);
    assert_eq!(blocks[0].content, "Moving Average");
    assert_eq!(blocks[1].block_type, BlockType::Unknown);
    assert_eq!(blocks[2].block_type, BlockType::Unknown);
}

#[test]
fn test_workflow_symbols_only_from_indicator_blocks() {
    let workflow: Workflow = serde_json::from_value(json!({
        "rootGroup": {"id": "root", "blocks": [
            {"id": "b1", "type": "indicator", "config": {"symbol": "ethusdt"}}
        ], "groups": [
            {"id": "g1", "blocks": [
                {"id": "b2", "type": "indicator", "config": {"symbol": " BTCUSDT "}},
                {"id": "b3", "type": "indicator", "config": {"symbol": "ETHUSDT"}},
                {"id": "b4", "type": "social", "config": {"symbol": "DOGEUSDT"}},
                {"id": "b5", "type": "indicator", "config": {}}
            ]}
        ]}
    }))
    .unwrap();

    let symbols: Vec<String> = workflow.symbols().into_iter().collect();
    assert_eq!(symbols, vec!["BTCUSDT".to_string(), "ETHUSDT".to_string()]);
    assert!(Workflow::default().symbols().is_empty());
}
