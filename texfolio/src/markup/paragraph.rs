//! Phase 4: paragraph splitting

use super::node::{Block, BlockKind, Node};

/// Group top-level nodes into paragraph blocks.
///
/// Blocks end at every [`Node::Break`]. A remark always forms a block of its
/// own. Whitespace at the edges of each block is trimmed and empty blocks are
/// dropped. A block led by a heading, a remark or a math span is
/// [`BlockKind::Bare`]; every other block is a [`BlockKind::Paragraph`].
pub fn split_paragraphs(nodes: Vec<Node>) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut current = Vec::new();

    for node in nodes {
        match node {
            Node::Break(_) => close_block(&mut current, &mut blocks),
            Node::Remark(_) => {
                close_block(&mut current, &mut blocks);
                blocks.push(Block {
                    kind: BlockKind::Bare,
                    nodes: vec![node],
                });
            }
            other => current.push(other),
        }
    }
    close_block(&mut current, &mut blocks);

    log::debug!("split into {} block(s)", blocks.len());
    blocks
}

fn close_block(current: &mut Vec<Node>, blocks: &mut Vec<Block>) {
    let mut nodes = std::mem::take(current);
    trim_edges(&mut nodes);

    let kind = match nodes.first() {
        None => return,
        Some(Node::Heading { .. } | Node::Remark(_) | Node::Math(_)) => BlockKind::Bare,
        Some(_) => BlockKind::Paragraph,
    };
    blocks.push(Block { kind, nodes });
}

/// Trim whitespace from the leading and trailing text nodes
fn trim_edges(nodes: &mut Vec<Node>) {
    while let Some(Node::Text(text)) = nodes.first_mut() {
        let trimmed = text.trim_start();
        if trimmed.is_empty() {
            nodes.remove(0);
        } else {
            *text = trimmed.to_string();
            break;
        }
    }

    while let Some(Node::Text(text)) = nodes.last_mut() {
        let trimmed = text.trim_end();
        if trimmed.is_empty() {
            nodes.pop();
        } else {
            text.truncate(trimmed.len());
            break;
        }
    }
}
