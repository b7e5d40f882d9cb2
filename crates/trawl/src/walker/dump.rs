//! Textual rendering of walker trees.
//!
//! One node per line, children indented by two spaces, aggregate fields
//! prefixed with their index:
//!
//! ```text
//! struct
//!   [1] leaf Outer.direct
//!   [3] ptr
//!     struct
//!       [0] leaf Inner.str
//! ```

use std::fmt;

use super::Walker;

impl Walker {
    /// Multi-line rendering of the tree, without a trailing newline.
    pub fn dump(&self) -> String {
        self.to_string()
    }

    fn head(&self) -> String {
        match self {
            Walker::Bare | Walker::SelfBare(_) => "self".to_owned(),
            Walker::Leaf(field) => format!("leaf {field}"),
            Walker::Pointer(_) => "ptr".to_owned(),
            Walker::Sequence(_) => "seq".to_owned(),
            Walker::Aggregate(_) => "struct".to_owned(),
            Walker::Dynamic(dynamic) => format!("dynamic {}", dynamic.field),
            Walker::SelfField(field, _) => format!("self {field}"),
        }
    }

    fn children(&self) -> Vec<(Option<usize>, &Walker)> {
        match self {
            Walker::Bare | Walker::Leaf(_) | Walker::Dynamic(_) => Vec::new(),
            Walker::Pointer(inner)
            | Walker::Sequence(inner)
            | Walker::SelfBare(inner)
            | Walker::SelfField(_, inner) => vec![(None, &**inner)],
            Walker::Aggregate(fields) => fields
                .iter()
                .map(|field| (Some(field.index), &field.inner))
                .collect(),
        }
    }
}

fn write_node(
    f: &mut fmt::Formatter<'_>,
    label: Option<usize>,
    walker: &Walker,
    depth: usize,
) -> fmt::Result {
    if depth > 0 {
        f.write_str("\n")?;
    }
    write!(f, "{:width$}", "", width = depth * 2)?;
    if let Some(index) = label {
        write!(f, "[{index}] ")?;
    }
    f.write_str(&walker.head())?;

    for (label, child) in walker.children() {
        write_node(f, label, child, depth + 1)?;
    }
    Ok(())
}

impl fmt::Display for Walker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_node(f, None, self, 0)
    }
}
