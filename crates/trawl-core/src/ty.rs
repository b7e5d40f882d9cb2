//! Type descriptors.
//!
//! A [`Type`] is a `Copy` handle to an interned [`TypeInfo`]. Exactly one
//! `TypeInfo` exists per Rust type for the life of the process, so handles
//! compare and hash by identity.
//!
//! Element and field types are stored as `fn() -> Type` rather than `Type`.
//! Resolution is deferred until someone asks, which is what lets a struct
//! describe a field that points back at itself.

use std::any::TypeId;
use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::field::FieldInfo;
use crate::kind::TypeKind;
use crate::registry;

/// Static description of a Rust type.
pub trait Typed: 'static {
    fn type_of() -> Type;
}

/// Named capability set.
///
/// Types declare the capabilities that their address form satisfies.
/// Pointer and option wrappers never satisfy anything on their own.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Capability(&'static str);

impl Capability {
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub fn name(self) -> &'static str {
        self.0
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Full description of one type. Built once, then leaked into the registry.
#[derive(Debug)]
pub struct TypeInfo {
    name: Cow<'static, str>,
    rust_id: TypeId,
    kind: TypeKind,
    elem: Option<fn() -> Type>,
    fields: Vec<FieldInfo>,
    capabilities: Vec<Capability>,
}

impl TypeInfo {
    /// Description of `T` with the given kind and no structure.
    pub fn new<T: ?Sized + 'static>(kind: TypeKind) -> Self {
        Self {
            name: Cow::Borrowed(std::any::type_name::<T>()),
            rust_id: TypeId::of::<T>(),
            kind,
            elem: None,
            fields: Vec::new(),
            capabilities: Vec::new(),
        }
    }

    /// Scalar or opaque type that cannot be descended into.
    pub fn leaf<T: ?Sized + 'static>(kind: TypeKind) -> Self {
        Self::new::<T>(kind)
    }

    /// `Box<E>`, `Option<E>`.
    pub fn pointer<T: ?Sized + 'static>(elem: fn() -> Type) -> Self {
        Self::new::<T>(TypeKind::Pointer).with_elem(elem)
    }

    /// `[E; N]`.
    pub fn array<T: ?Sized + 'static>(elem: fn() -> Type) -> Self {
        Self::new::<T>(TypeKind::Array).with_elem(elem)
    }

    /// `Vec<E>`.
    pub fn slice<T: ?Sized + 'static>(elem: fn() -> Type) -> Self {
        Self::new::<T>(TypeKind::Slice).with_elem(elem)
    }

    /// Record with fields in declaration order.
    pub fn structure<T: ?Sized + 'static>(fields: Vec<FieldInfo>) -> Self {
        let mut info = Self::new::<T>(TypeKind::Struct);
        info.fields = fields;
        info
    }

    /// Open sum-type slot.
    pub fn dynamic<T: ?Sized + 'static>() -> Self {
        Self::new::<T>(TypeKind::Dynamic)
    }

    pub fn named(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_elem(mut self, elem: fn() -> Type) -> Self {
        self.elem = Some(elem);
        self
    }

    pub fn with_capability(mut self, capability: Capability) -> Self {
        if !self.capabilities.contains(&capability) {
            self.capabilities.push(capability);
        }
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    pub fn fields(&self) -> &[FieldInfo] {
        &self.fields
    }

    pub fn capabilities(&self) -> &[Capability] {
        &self.capabilities
    }

    pub(crate) fn rust_id(&self) -> TypeId {
        self.rust_id
    }

    pub(crate) fn elem_fn(&self) -> Option<fn() -> Type> {
        self.elem
    }
}

/// Interned type handle.
#[derive(Clone, Copy)]
pub struct Type(&'static TypeInfo);

impl Type {
    /// Descriptor of `T`.
    #[inline]
    pub fn of<T: Typed>() -> Type {
        T::type_of()
    }

    /// Look up the descriptor of `T`, building it with `build` on first use.
    ///
    /// `build` runs without any lock held and may be called more than once
    /// under contention; only the first installed result is kept.
    pub fn intern<T: ?Sized + 'static>(build: impl FnOnce() -> TypeInfo) -> Type {
        registry::intern::<T>(build)
    }

    pub(crate) fn from_static(info: &'static TypeInfo) -> Type {
        Type(info)
    }

    pub fn info(self) -> &'static TypeInfo {
        self.0
    }

    pub fn name(self) -> &'static str {
        &self.0.name
    }

    pub fn kind(self) -> TypeKind {
        self.0.kind
    }

    /// Pointee of a pointer, element of a sequence.
    pub fn elem(self) -> Option<Type> {
        self.0.elem.map(|elem| elem())
    }

    /// Fields in declaration order. Empty for non-struct types.
    pub fn fields(self) -> &'static [FieldInfo] {
        &self.0.fields
    }

    pub fn field(self, index: usize) -> Option<&'static FieldInfo> {
        self.0.fields.get(index)
    }

    pub fn num_fields(self) -> usize {
        self.0.fields.len()
    }

    /// Whether the type, via its address form, satisfies `capability`.
    pub fn satisfies(self, capability: Capability) -> bool {
        self.0.capabilities.contains(&capability)
    }

    /// Whether this descriptor denotes the Rust type `T`.
    pub fn is<T: ?Sized + 'static>(self) -> bool {
        self.0.rust_id == TypeId::of::<T>()
    }

    /// Strip every pointer layer: `Option<Box<T>>` becomes `T`.
    pub fn deref(self) -> Type {
        let mut ty = self;
        while ty.kind() == TypeKind::Pointer {
            match ty.elem() {
                Some(elem) => ty = elem,
                None => break,
            }
        }
        ty
    }

    /// Strip every pointer and sequence layer: `Option<Vec<Box<T>>>` becomes `T`.
    pub fn elem_deep(self) -> Type {
        let mut ty = self;
        while ty.kind().has_elem() {
            match ty.elem() {
                Some(elem) => ty = elem,
                None => break,
            }
        }
        ty
    }
}

impl PartialEq for Type {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.0, other.0)
    }
}

impl Eq for Type {}

impl Hash for Type {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::ptr::hash(self.0, state)
    }
}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Type({})", self.name())
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
