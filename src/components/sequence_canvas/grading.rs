//! Submission grading and the graded-view projections: missing edges,
//! per-node connection cues and the reference chain.

use std::collections::HashMap;

use super::error::SubmitError;
use super::types::{Connection, ConnectionStatus, NodeData, Position};

/// Result of grading a complete submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GradeReport {
	pub pass: bool,
	pub all_valid: bool,
	/// Canonical identities visited walking successors from the first node.
	pub walked: Vec<char>,
	pub expected: Vec<char>,
	/// `(from, to)` canonical identities of each submitted connection.
	pub pairs: Vec<(char, char)>,
}

/// Whether `to` immediately follows `from` in `sequence`.
pub fn is_successor(sequence: &[char], from: char, to: char) -> bool {
	match (
		sequence.iter().position(|&c| c == from),
		sequence.iter().position(|&c| c == to),
	) {
		(Some(i), Some(j)) => j == i + 1,
		_ => false,
	}
}

pub fn grade(
	nodes: &[NodeData],
	connections: &[Connection],
	sequence: &[char],
) -> Result<GradeReport, SubmitError> {
	let expected = nodes.len().saturating_sub(1);
	if connections.len() != expected {
		return Err(SubmitError::Incomplete {
			nodes: nodes.len(),
			expected,
			found: connections.len(),
		});
	}

	let by_id: HashMap<&str, &NodeData> = nodes.iter().map(|n| (n.id.as_str(), n)).collect();
	let successor: HashMap<&str, &str> = connections
		.iter()
		.map(|c| (c.from_node_id.as_str(), c.to_node_id.as_str()))
		.collect();

	let mut walked = Vec::with_capacity(nodes.len());
	let mut current = sequence
		.first()
		.and_then(|&first| nodes.iter().find(|n| n.hidden_name == first))
		.map(|n| n.id.as_str());
	// One step per node at most; unknown ids still use up a step.
	for _ in 0..nodes.len() {
		let Some(id) = current else {
			break;
		};
		if let Some(node) = by_id.get(id) {
			walked.push(node.hidden_name);
		}
		current = successor.get(id).copied();
	}

	let all_valid = connections.iter().all(|c| c.is_valid);
	let pairs = connections
		.iter()
		.filter_map(|c| {
			let from = by_id.get(c.from_node_id.as_str())?;
			let to = by_id.get(c.to_node_id.as_str())?;
			Some((from.hidden_name, to.hidden_name))
		})
		.collect();

	Ok(GradeReport {
		pass: all_valid && walked == sequence,
		all_valid,
		walked,
		expected: sequence.to_vec(),
		pairs,
	})
}

/// Required edges of the canonical chain that are absent from `connections`.
/// Every returned connection is marked invalid; callers render it as missing.
pub fn missing_connections(
	nodes: &[NodeData],
	connections: &[Connection],
	sequence: &[char],
) -> Vec<Connection> {
	let id_of = |name: char| nodes.iter().find(|n| n.hidden_name == name).map(|n| n.id.as_str());

	sequence
		.windows(2)
		.filter_map(|pair| Some((id_of(pair[0])?, id_of(pair[1])?)))
		.filter(|(from, to)| {
			!connections
				.iter()
				.any(|c| c.from_node_id == *from && c.to_node_id == *to)
		})
		.map(|(from, to)| Connection {
			id: format!("missing-{from}-{to}"),
			from_node_id: from.to_string(),
			to_node_id: to.to_string(),
			is_valid: false,
		})
		.collect()
}

/// The first node of the chain needs only an outgoing edge, the last only an
/// incoming one, and interior nodes need both.
pub fn connection_status(
	node: &NodeData,
	connections: &[Connection],
	sequence: &[char],
) -> ConnectionStatus {
	let has_input = connections.iter().any(|c| c.to_node_id == node.id);
	let has_output = connections.iter().any(|c| c.from_node_id == node.id);
	let connected = if sequence.first() == Some(&node.hidden_name) {
		has_output
	} else if sequence.last() == Some(&node.hidden_name) {
		has_input
	} else {
		has_input && has_output
	};
	if connected {
		ConnectionStatus::Connected
	} else {
		ConnectionStatus::Unconnected
	}
}

/// Static copy of the correct chain, laid out in a row starting at `origin`.
pub fn reference_chain(
	nodes: &[NodeData],
	sequence: &[char],
	origin: Position,
	spacing: f64,
) -> (Vec<NodeData>, Vec<Connection>) {
	let ordered: Vec<NodeData> = sequence
		.iter()
		.filter_map(|&name| nodes.iter().find(|n| n.hidden_name == name))
		.enumerate()
		.map(|(i, n)| NodeData {
			id: format!("correct-{}", n.id),
			position: Position::new(origin.x + i as f64 * spacing, origin.y),
			..n.clone()
		})
		.collect();
	let connections = ordered
		.windows(2)
		.map(|pair| Connection::new(&pair[0].id, &pair[1].id, true))
		.collect();
	(ordered, connections)
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;
	use crate::components::sequence_canvas::types::Quiz;

	fn edge(quiz: &Quiz, from: char, to: char) -> Connection {
		let id = |c| quiz.node_by_hidden_name(c).map(|n| n.id.clone()).unwrap();
		Connection::new(&id(from), &id(to), is_successor(&quiz.sequence, from, to))
	}

	#[test]
	fn successor_rule() {
		let seq = ['A', 'B', 'C', 'D'];
		assert!(is_successor(&seq, 'A', 'B'));
		assert!(!is_successor(&seq, 'B', 'A'));
		assert!(!is_successor(&seq, 'A', 'C'));
		assert!(!is_successor(&seq, 'D', 'E'));
	}

	#[test]
	fn correct_chain_passes() {
		let quiz = Quiz::shading_stages();
		let connections = vec![edge(&quiz, 'A', 'B'), edge(&quiz, 'B', 'C'), edge(&quiz, 'C', 'D')];
		let report = grade(&quiz.nodes, &connections, &quiz.sequence).unwrap();
		assert!(report.pass);
		assert_eq!(report.walked, vec!['A', 'B', 'C', 'D']);
		assert_eq!(report.pairs, vec![('A', 'B'), ('B', 'C'), ('C', 'D')]);
	}

	#[test]
	fn wrong_order_fails() {
		let quiz = Quiz::shading_stages();
		let connections = vec![edge(&quiz, 'A', 'C'), edge(&quiz, 'C', 'B'), edge(&quiz, 'B', 'D')];
		let report = grade(&quiz.nodes, &connections, &quiz.sequence).unwrap();
		assert!(!report.pass);
		assert!(!report.all_valid);
		assert_eq!(report.walked, vec!['A', 'C', 'B', 'D']);
	}

	#[test]
	fn incomplete_is_rejected_before_walking() {
		let quiz = Quiz::shading_stages();
		let connections = vec![edge(&quiz, 'A', 'B'), edge(&quiz, 'B', 'C')];
		assert_eq!(
			grade(&quiz.nodes, &connections, &quiz.sequence),
			Err(SubmitError::Incomplete {
				nodes: 4,
				expected: 3,
				found: 2
			})
		);
	}

	#[test]
	fn walk_is_bounded_on_cycles() {
		let quiz = Quiz::shading_stages();
		let connections = vec![
			Connection::new("1", "2", true),
			Connection::new("2", "1", false),
			Connection::new("3", "4", true),
		];
		let report = grade(&quiz.nodes, &connections, &quiz.sequence).unwrap();
		assert_eq!(report.walked, vec!['A', 'B', 'A', 'B']);
		assert!(!report.pass);
	}

	#[test]
	fn dangling_references_are_skipped() {
		let quiz = Quiz::shading_stages();
		let connections = vec![
			Connection::new("1", "2", true),
			Connection::new("2", "ghost", true),
			Connection::new("3", "4", true),
		];
		let report = grade(&quiz.nodes, &connections, &quiz.sequence).unwrap();
		assert_eq!(report.walked, vec!['A', 'B']);
		assert_eq!(report.pairs, vec![('A', 'B'), ('C', 'D')]);
		assert!(!report.pass);
	}

	#[test]
	fn walk_through_unknown_cycle_terminates() {
		let quiz = Quiz::shading_stages();
		let connections = vec![
			Connection::new("1", "ghost", true),
			Connection::new("ghost", "ghost2", true),
			Connection::new("ghost2", "ghost", true),
		];
		let report = grade(&quiz.nodes, &connections, &quiz.sequence).unwrap();
		assert_eq!(report.walked, vec!['A']);
		assert!(report.pairs.is_empty());
		assert!(!report.pass);
	}

	#[test]
	fn absent_required_edge_is_reported_missing() {
		let quiz = Quiz::shading_stages();
		let connections = vec![edge(&quiz, 'A', 'B'), edge(&quiz, 'B', 'D'), edge(&quiz, 'C', 'A')];
		let missing = missing_connections(&quiz.nodes, &connections, &quiz.sequence);
		let ids: Vec<&str> = missing.iter().map(|c| c.id.as_str()).collect();
		assert_eq!(ids, vec!["missing-2-3", "missing-3-4"]);
	}

	#[test]
	fn chain_endpoints_need_one_edge() {
		let quiz = Quiz::shading_stages();
		let connections = vec![edge(&quiz, 'A', 'B'), edge(&quiz, 'C', 'D')];
		let status: Vec<ConnectionStatus> = quiz
			.nodes
			.iter()
			.map(|n| connection_status(n, &connections, &quiz.sequence))
			.collect();
		assert_eq!(
			status,
			vec![
				ConnectionStatus::Connected,
				ConnectionStatus::Unconnected,
				ConnectionStatus::Unconnected,
				ConnectionStatus::Connected,
			]
		);
	}

	#[test]
	fn reference_chain_is_laid_out_in_a_row() {
		let quiz = Quiz::shading_stages();
		let origin = Position::new(100.0, 750.0);
		let (nodes, connections) = reference_chain(&quiz.nodes, &quiz.sequence, origin, 220.0);
		let layout: Vec<(&str, Position)> =
			nodes.iter().map(|n| (n.id.as_str(), n.position)).collect();
		assert_eq!(
			layout,
			vec![
				("correct-1", Position::new(100.0, 750.0)),
				("correct-2", Position::new(320.0, 750.0)),
				("correct-3", Position::new(540.0, 750.0)),
				("correct-4", Position::new(760.0, 750.0)),
			]
		);
		assert!(connections.iter().all(|c| c.is_valid));
		assert_eq!(connections[0].id, "correct-1-correct-2");
	}
}
