//! Shared fixtures.

use crate::{Capability, Dynamic, Field, FilterRef, Reflect, WalkerCache};

pub const STRINGER: Capability = Capability::new("Stringer");

#[derive(Reflect, Clone, Debug, Default, PartialEq)]
pub struct Embedded {
    pub text: String,
}

#[derive(Reflect, Clone, Debug, Default, PartialEq)]
pub struct Inner {
    pub text: String,
}

#[derive(Reflect, Default)]
pub struct Outer {
    #[trawl(embed)]
    pub embedded: Embedded,
    pub direct: String,
    pub inner: Inner,
    pub inner_ptr: Option<Box<Inner>>,
    pub dynamic: Dynamic,
}

impl Outer {
    pub fn populated() -> Self {
        Self {
            embedded: Embedded {
                text: "embedded".into(),
            },
            direct: "direct".into(),
            inner: Inner {
                text: "inner".into(),
            },
            inner_ptr: Some(Box::new(Inner {
                text: "pointee".into(),
            })),
            dynamic: Dynamic::new(String::from("held")),
        }
    }
}

#[derive(Reflect, Default)]
pub struct Slot {
    pub held: Dynamic,
}

#[derive(Reflect, Default)]
pub struct Listed {
    #[trawl(tag = r#"json:"names""#)]
    pub names: Vec<String>,
}

#[derive(Reflect, Default)]
pub struct Ordered {
    pub a: String,
    pub b: String,
    pub c: String,
}

#[derive(Reflect, Default)]
pub struct Node {
    pub name: String,
    pub next: Option<Box<Node>>,
}

#[derive(Reflect, Default)]
#[allow(dead_code)]
pub struct Mixed {
    pub shown: String,
    hidden: String,
}

impl Mixed {
    pub fn new(shown: &str, hidden: &str) -> Self {
        Self {
            shown: shown.into(),
            hidden: hidden.into(),
        }
    }
}

#[derive(Reflect, Default)]
pub struct Tagged {
    #[trawl(tag = r#"json:"name" db:"-""#)]
    pub name: String,
    #[trawl(tag = r#"json:"note,omitempty""#)]
    pub note: String,
    pub plain: String,
}

#[derive(Reflect, Clone, Debug, Default, PartialEq)]
#[trawl(capability = STRINGER)]
pub struct Label {
    pub text: String,
}

#[derive(Reflect, Default)]
pub struct Board {
    pub title: String,
    pub labels: Vec<Label>,
    pub pinned: Option<Label>,
    pub counts: [u32; 2],
}

/// Walk `value` and render each visit as `field => value`.
pub fn record(cache: &WalkerCache, value: &dyn Reflect, filter: &FilterRef) -> Vec<String> {
    let mut out = Vec::new();
    cache
        .walk_fn(value, Some(filter), |value, field: &Field| {
            out.push(format!("{field} => {}", render(value)));
        })
        .unwrap();
    out
}

pub fn render(value: &dyn Reflect) -> String {
    match value.downcast_ref::<String>() {
        Some(text) => format!("{text:?}"),
        None => format!("{value:?}"),
    }
}
