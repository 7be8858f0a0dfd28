use super::part::PartType;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRole {
    StackTop,
    StackBottom,
    EngineTop,
    FuelInput,
    FuelOutput,
}

/// Attachment point on a part. `position` is normalized to the part's own
/// box: x in [-0.5, 0.5] across the width, y in [0, 1] from bottom to top.
#[derive(Debug, Clone, PartialEq)]
pub struct AttachmentNode {
    pub id: &'static str,
    pub role: NodeRole,
    pub position: (f64, f64),
    pub accepts: &'static [NodeRole],
}

impl AttachmentNode {
    const fn new(
        id: &'static str,
        role: NodeRole,
        position: (f64, f64),
        accepts: &'static [NodeRole],
    ) -> Self {
        AttachmentNode {
            id,
            role,
            position,
            accepts,
        }
    }

    pub fn accepts(&self, role: NodeRole) -> bool {
        self.accepts.contains(&role)
    }
}

pub fn default_nodes(part_type: PartType) -> Vec<AttachmentNode> {
    use NodeRole::*;
    match part_type {
        PartType::Pod => vec![AttachmentNode::new(
            "bottom",
            StackBottom,
            (0.0, 0.0),
            &[StackTop],
        )],
        PartType::Tank => vec![
            AttachmentNode::new("top", StackTop, (0.0, 1.0), &[StackBottom, FuelOutput]),
            AttachmentNode::new(
                "bottom",
                StackBottom,
                (0.0, 0.0),
                &[StackTop, EngineTop, FuelInput],
            ),
            AttachmentNode::new("fuel_out_T", FuelOutput, (0.0, 1.0), &[FuelInput]),
            AttachmentNode::new("fuel_out_B", FuelOutput, (0.0, 0.0), &[FuelInput]),
        ],
        PartType::Engine => vec![
            AttachmentNode::new("top", EngineTop, (0.0, 1.0), &[StackBottom, FuelOutput]),
            AttachmentNode::new("fuel_in", FuelInput, (0.0, 0.8), &[FuelOutput]),
        ],
        PartType::Fairing => vec![AttachmentNode::new(
            "bottom",
            StackBottom,
            (0.0, 0.0),
            &[StackTop],
        )],
    }
}

/// Whether `upper` can sit directly on top of `lower` in a stack: the upper
/// part's bottom node must accept one of the lower part's top nodes.
pub fn can_stack(lower: &[AttachmentNode], upper: &[AttachmentNode]) -> bool {
    let Some(bottom) = upper.iter().find(|node| node.role == NodeRole::StackBottom) else {
        return false;
    };
    lower
        .iter()
        .filter(|node| matches!(node.role, NodeRole::StackTop | NodeRole::EngineTop))
        .any(|node| bottom.accepts(node.role) && node.accepts(bottom.role))
}
