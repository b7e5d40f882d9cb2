//! Field descriptors.
//!
//! [`FieldInfo`] is the static description of one declared field.
//! [`Field`] is the lightweight `(owner, index)` reference the engine passes
//! around: it is `Copy`, hashable, and resolves to a `FieldInfo` on demand.

use std::fmt;
use std::sync::{LazyLock, RwLock};

use indexmap::IndexMap;
use indexmap::map::Entry;

use crate::kind::TypeKind;
use crate::tag::Tag;
use crate::ty::Type;
use crate::validate::{KindError, validate_kind};

/// Static description of a struct field.
#[derive(Clone, Copy, Debug)]
pub struct FieldInfo {
    name: &'static str,
    ty: fn() -> Type,
    tag: Tag,
    embedded: bool,
    public: bool,
    offset: usize,
}

impl FieldInfo {
    pub const fn new(name: &'static str, ty: fn() -> Type) -> Self {
        Self {
            name,
            ty,
            tag: Tag::EMPTY,
            embedded: false,
            public: false,
            offset: 0,
        }
    }

    pub const fn with_tag(mut self, tag: &'static str) -> Self {
        self.tag = Tag::new(tag);
        self
    }

    pub const fn embedded(mut self) -> Self {
        self.embedded = true;
        self
    }

    pub const fn public(mut self) -> Self {
        self.public = true;
        self
    }

    pub const fn at_offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn ty(&self) -> Type {
        (self.ty)()
    }

    pub fn tag(&self) -> Tag {
        self.tag
    }

    pub fn is_embedded(&self) -> bool {
        self.embedded
    }

    /// Externally visible fields are the ones declared `pub`. The walker
    /// builder never descends into anything else.
    pub fn is_public(&self) -> bool {
        self.public
    }

    /// Byte offset within the owning struct.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Embedded by value: an embedded field whose type is itself a struct.
    /// Embedded pointers are not flattened.
    pub fn is_embed(&self) -> bool {
        self.embedded && self.ty().kind() == TypeKind::Struct
    }
}

/// Reference to a declared field, or to nothing.
///
/// The zero value [`Field::NONE`] denotes a top-level request: there is no
/// owning struct, and accessors return neutral values.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct Field {
    owner: Option<Type>,
    index: usize,
}

impl Field {
    pub const NONE: Field = Field {
        owner: None,
        index: 0,
    };

    pub fn new(owner: Type, index: usize) -> Self {
        Self {
            owner: Some(owner),
            index,
        }
    }

    pub fn owner(&self) -> Option<Type> {
        self.owner
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Whether this denotes a real field rather than a top-level request.
    pub fn is_valid(&self) -> bool {
        self.owner.is_some()
    }

    pub fn info(&self) -> Option<&'static FieldInfo> {
        self.owner?.field(self.index)
    }

    pub fn name(&self) -> &'static str {
        self.info().map_or("", FieldInfo::name)
    }

    pub fn tag(&self) -> Tag {
        self.info().map_or(Tag::EMPTY, FieldInfo::tag)
    }

    pub fn ty(&self) -> Option<Type> {
        self.info().map(FieldInfo::ty)
    }

    pub fn is_embedded(&self) -> bool {
        self.info().is_some_and(FieldInfo::is_embedded)
    }

    pub fn is_public(&self) -> bool {
        self.info().is_some_and(FieldInfo::is_public)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.owner {
            None => f.write_str("<none>"),
            Some(owner) => match owner.field(self.index) {
                Some(info) if !info.name().is_empty() => write!(f, "{owner}.{}", info.name()),
                _ => write!(f, "{owner}.{}", self.index),
            },
        }
    }
}

// ============================================================================
// Flattened fields
// ============================================================================

/// Field reached by flattening embedded structs.
#[derive(Clone, Debug)]
pub struct DeepField {
    /// Field indexes from the outermost struct down to this field.
    pub path: Vec<usize>,
    /// Offset from the start of the outermost struct.
    pub offset: usize,
    pub info: &'static FieldInfo,
}

impl DeepField {
    pub fn name(&self) -> &'static str {
        self.info.name()
    }
}

static DEEP_FIELDS: LazyLock<RwLock<IndexMap<Type, &'static [DeepField]>>> =
    LazyLock::new(|| RwLock::new(IndexMap::new()));

static OFFSET_FIELDS: LazyLock<RwLock<IndexMap<Type, &'static OffsetFields>>> =
    LazyLock::new(|| RwLock::new(IndexMap::new()));

/// Deep fields keyed by byte offset.
pub type OffsetFields = IndexMap<usize, Vec<DeepField>>;

/// Declared fields of a struct, looking through pointers.
pub fn type_fields(ty: Type) -> Result<&'static [FieldInfo], KindError> {
    let ty = validate_kind(ty.deref(), TypeKind::Struct)?;
    Ok(ty.fields())
}

/// Fields of a struct with every by-value embedded struct flattened in place.
/// Cached per type.
pub fn deep_fields(ty: Type) -> Result<&'static [DeepField], KindError> {
    let ty = validate_kind(ty.deref(), TypeKind::Struct)?;
    Ok(cached(&*DEEP_FIELDS, ty, || {
        let mut out = Vec::with_capacity(ty.num_fields());
        let mut path = Vec::new();
        append_deep_fields(&mut out, &mut path, ty, 0);
        out.into_boxed_slice()
    }))
}

/// Deep fields grouped by byte offset. Zero-sized fields share an offset
/// with their neighbors, so each offset may map to several fields.
pub fn offset_fields(ty: Type) -> Result<&'static OffsetFields, KindError> {
    let fields = deep_fields(ty)?;
    let ty = ty.deref();
    Ok(cached(&*OFFSET_FIELDS, ty, || {
        let mut out = OffsetFields::with_capacity(fields.len());
        for field in fields {
            out.entry(field.offset).or_default().push(field.clone());
        }
        Box::new(out)
    }))
}

fn append_deep_fields(out: &mut Vec<DeepField>, path: &mut Vec<usize>, ty: Type, base: usize) {
    for (index, info) in ty.fields().iter().enumerate() {
        path.push(index);
        let offset = base + info.offset();
        if info.is_embed() {
            append_deep_fields(out, path, info.ty(), offset);
        } else {
            out.push(DeepField {
                path: path.clone(),
                offset,
                info,
            });
        }
        path.pop();
    }
}

fn cached<V: ?Sized>(
    cache: &RwLock<IndexMap<Type, &'static V>>,
    ty: Type,
    build: impl FnOnce() -> Box<V>,
) -> &'static V {
    if let Some(hit) = cache
        .read()
        .expect("field cache lock poisoned")
        .get(&ty)
        .copied()
    {
        return hit;
    }

    let built = build();
    let mut map = cache.write().expect("field cache lock poisoned");
    match map.entry(ty) {
        Entry::Occupied(entry) => *entry.get(),
        Entry::Vacant(entry) => {
            let leaked: &'static V = Box::leak(built);
            entry.insert(leaked);
            leaked
        }
    }
}
