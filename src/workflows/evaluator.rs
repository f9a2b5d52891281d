//! Workflow evaluation engine
//!
//! Walks the group tree post-order with an explicit stack, so nesting depth is
//! bounded by heap rather than call-stack size. Every child is evaluated; no
//! short-circuiting.

use crate::indicators::IndicatorEvaluator;
use crate::models::workflow::{Block, BlockType, Group, Node, Workflow};
use crate::workflows::snapshot::MarketSnapshot;
use serde::Serialize;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TraceNode {
    Block,
    Group,
}

/// One evaluated node, recorded in post-order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TraceEntry {
    pub id: String,
    pub node: TraceNode,
    pub depth: usize,
    pub passed: bool,
}

/// Result of evaluating a workflow with its trace
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WorkflowOutcome {
    pub triggered: bool,
    pub trace: Vec<TraceEntry>,
}

enum Step<'w> {
    Visit(Node<'w>, usize),
    Combine(&'w Group, usize),
}

pub struct WorkflowEvaluator<'a> {
    market: &'a MarketSnapshot,
}

impl<'a> WorkflowEvaluator<'a> {
    pub fn new(market: &'a MarketSnapshot) -> Self {
        Self { market }
    }

    /// `false` when the workflow has no root group.
    pub fn evaluate_workflow(&self, workflow: &Workflow) -> bool {
        match workflow.root_group {
            Some(ref root) => self.walk(root, None),
            None => {
                debug!("WorkflowEvaluator: workflow has no rootGroup");
                false
            }
        }
    }

    pub fn evaluate_traced(&self, workflow: &Workflow) -> WorkflowOutcome {
        let Some(ref root) = workflow.root_group else {
            return WorkflowOutcome::default();
        };
        let mut trace = Vec::new();
        let triggered = self.walk(root, Some(&mut trace));
        WorkflowOutcome { triggered, trace }
    }

    pub fn evaluate_group(&self, group: &Group) -> bool {
        self.walk(group, None)
    }

    /// Indicator blocks read their symbol's series; other block types are false.
    pub fn evaluate_block(&self, block: &Block) -> bool {
        if block.block_type != BlockType::Indicator {
            return false;
        }
        let candles = block
            .symbol()
            .map(|symbol| self.market.candles(&symbol))
            .unwrap_or(&[]);
        IndicatorEvaluator::evaluate(block, candles)
    }

    fn walk(&self, root: &Group, mut trace: Option<&mut Vec<TraceEntry>>) -> bool {
        let mut steps = vec![Step::Visit(Node::Group(root), 0)];
        // Each finished node leaves exactly one value here.
        let mut results: Vec<bool> = Vec::new();

        while let Some(step) = steps.pop() {
            match step {
                Step::Visit(Node::Block(block), depth) => {
                    let passed = self.evaluate_block(block);
                    record(&mut trace, &block.id, TraceNode::Block, depth, passed);
                    results.push(passed);
                }
                Step::Visit(Node::Group(group), depth) => {
                    if group.is_malformed() {
                        warn!(
                            group_id = %group.id,
                            "WorkflowEvaluator: unreadable group evaluates false"
                        );
                        record(&mut trace, &group.id, TraceNode::Group, depth, false);
                        results.push(false);
                        continue;
                    }
                    steps.push(Step::Combine(group, depth));
                    steps.extend(
                        group
                            .children()
                            .rev()
                            .map(|child| Step::Visit(child, depth + 1)),
                    );
                }
                Step::Combine(group, depth) => {
                    let start = results.len().saturating_sub(group.child_count());
                    let passed = group.operator.combine(&results[start..]);
                    results.truncate(start);
                    record(&mut trace, &group.id, TraceNode::Group, depth, passed);
                    results.push(passed);
                }
            }
        }

        results.pop().unwrap_or(false)
    }
}

fn record(
    trace: &mut Option<&mut Vec<TraceEntry>>,
    id: &str,
    node: TraceNode,
    depth: usize,
    passed: bool,
) {
    if let Some(entries) = trace.as_deref_mut() {
        entries.push(TraceEntry {
            id: id.to_string(),
            node,
            depth,
            passed,
        });
    }
}
