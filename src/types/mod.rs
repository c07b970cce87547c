//! Flow graph data model: nodes, edges, values and pass results.
//!
//! These types are what the editor hands to the engine and what the engine
//! hands back. All of them round-trip through JSON.

mod execution_result;
mod flow_edge;
mod flow_graph;
mod flow_node;
mod node_kind;
mod node_params;
mod node_value;

pub use execution_result::{EdgeOutputs, ExecutionResult, NodeOutputs};
pub use flow_edge::FlowEdge;
pub use flow_graph::FlowGraph;
pub use flow_node::FlowNode;
pub use node_kind::NodeKind;
pub use node_params::{DEFAULT_BATCH_SIZE, DEFAULT_FIELD_INDEX, NodeParams};
pub use node_value::{NodeValue, split_lines};
