use std::collections::HashSet;
use crate::ast::NodeType;
use crate::optimizer::OptimizedNode;

pub(crate) fn collect_vars(node: &OptimizedNode) -> Vec<String> {
    fn walk(node: &OptimizedNode, seen: &mut HashSet<String>, out: &mut Vec<String>) {
        if node.kind == NodeType::Variable && !seen.contains(&node.old_value) {
            seen.insert(node.old_value.clone());
            out.push(node.old_value.clone());
        }
        if let Some(l) = &node.left { walk(l, seen, out); }
        if let Some(r) = &node.right { walk(r, seen, out); }
    }
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    walk(node, &mut seen, &mut out);
    out
}
