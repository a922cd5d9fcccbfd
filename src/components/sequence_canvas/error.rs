use thiserror::Error;

/// Why a connection gesture was refused. The message doubles as the notice
/// shown to the learner.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectError {
	#[error("A node cannot be connected to itself")]
	SelfConnection,
	#[error("A connection already exists on this node")]
	SourceSaturated,
	#[error("A connection already exists on this node")]
	TargetSaturated,
	#[error("Unknown node {0}")]
	UnknownNode(String),
	#[error("No connection is being drawn")]
	NotDrawing,
	#[error("The quiz has already been submitted")]
	Submitted,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
	#[error(
		"Missing connections. Connect all {nodes} nodes in sequence \
		 ({found} of {expected} connections)."
	)]
	Incomplete {
		nodes: usize,
		expected: usize,
		found: usize,
	},
	#[error("The quiz has already been submitted")]
	AlreadySubmitted,
}
