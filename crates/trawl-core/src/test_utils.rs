//! Hand-written fixtures for tests that cannot use the derive.

use std::mem::offset_of;

use crate::{Capability, FieldInfo, Reflect, ReflectMut, ReflectRef, Struct, Type, TypeInfo, Typed};

pub const STRINGER: Capability = Capability::new("Stringer");

#[derive(Debug, Default, PartialEq)]
pub struct Embed {
    pub embed_str: String,
    pub embed_num: i64,
}

#[derive(Debug, Default, PartialEq)]
pub struct Inner {
    pub inner_str: String,
    pub inner_num: i64,
}

#[derive(Debug, Default)]
pub struct Holder {
    pub one: String,
    pub embed: Embed,
    pub inner: Option<Box<Inner>>,
    pub two: i64,
    pub hidden: String,
}

impl Typed for Embed {
    fn type_of() -> Type {
        Type::intern::<Self>(|| {
            TypeInfo::structure::<Self>(vec![
                FieldInfo::new("embed_str", String::type_of)
                    .with_tag(r#"json:"embedStr" db:"embed_str""#)
                    .public()
                    .at_offset(offset_of!(Embed, embed_str)),
                FieldInfo::new("embed_num", i64::type_of)
                    .with_tag(r#"json:"embedNum" db:"embed_num""#)
                    .public()
                    .at_offset(offset_of!(Embed, embed_num)),
            ])
            .named("Embed")
            .with_capability(STRINGER)
        })
    }
}

impl Reflect for Embed {
    crate::reflect_boilerplate!();

    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Struct(self)
    }

    fn reflect_mut(&mut self) -> ReflectMut<'_> {
        ReflectMut::Struct(self)
    }

    fn is_zero(&self) -> bool {
        self.embed_str.is_zero() && self.embed_num.is_zero()
    }
}

impl Struct for Embed {
    fn field(&self, index: usize) -> Option<&dyn Reflect> {
        match index {
            0 => Some(&self.embed_str),
            1 => Some(&self.embed_num),
            _ => None,
        }
    }

    fn field_mut(&mut self, index: usize) -> Option<&mut dyn Reflect> {
        match index {
            0 => Some(&mut self.embed_str),
            1 => Some(&mut self.embed_num),
            _ => None,
        }
    }
}

impl Typed for Inner {
    fn type_of() -> Type {
        Type::intern::<Self>(|| {
            TypeInfo::structure::<Self>(vec![
                FieldInfo::new("inner_str", String::type_of)
                    .with_tag(r#"json:"innerStr" db:"inner_str""#)
                    .public()
                    .at_offset(offset_of!(Inner, inner_str)),
                FieldInfo::new("inner_num", i64::type_of)
                    .with_tag(r#"json:"innerNum" db:"inner_num""#)
                    .public()
                    .at_offset(offset_of!(Inner, inner_num)),
            ])
            .named("Inner")
        })
    }
}

impl Reflect for Inner {
    crate::reflect_boilerplate!();

    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Struct(self)
    }

    fn reflect_mut(&mut self) -> ReflectMut<'_> {
        ReflectMut::Struct(self)
    }

    fn is_zero(&self) -> bool {
        self.inner_str.is_zero() && self.inner_num.is_zero()
    }
}

impl Struct for Inner {
    fn field(&self, index: usize) -> Option<&dyn Reflect> {
        match index {
            0 => Some(&self.inner_str),
            1 => Some(&self.inner_num),
            _ => None,
        }
    }

    fn field_mut(&mut self, index: usize) -> Option<&mut dyn Reflect> {
        match index {
            0 => Some(&mut self.inner_str),
            1 => Some(&mut self.inner_num),
            _ => None,
        }
    }
}

impl Typed for Holder {
    fn type_of() -> Type {
        Type::intern::<Self>(|| {
            TypeInfo::structure::<Self>(vec![
                FieldInfo::new("one", String::type_of)
                    .public()
                    .at_offset(offset_of!(Holder, one)),
                FieldInfo::new("embed", Embed::type_of)
                    .embedded()
                    .public()
                    .at_offset(offset_of!(Holder, embed)),
                FieldInfo::new("inner", <Option<Box<Inner>>>::type_of)
                    .embedded()
                    .public()
                    .at_offset(offset_of!(Holder, inner)),
                FieldInfo::new("two", i64::type_of)
                    .public()
                    .at_offset(offset_of!(Holder, two)),
                FieldInfo::new("hidden", String::type_of).at_offset(offset_of!(Holder, hidden)),
            ])
            .named("Holder")
        })
    }
}

impl Reflect for Holder {
    crate::reflect_boilerplate!();

    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Struct(self)
    }

    fn reflect_mut(&mut self) -> ReflectMut<'_> {
        ReflectMut::Struct(self)
    }

    fn is_zero(&self) -> bool {
        self.one.is_zero()
            && self.embed.is_zero()
            && self.inner.is_zero()
            && self.two.is_zero()
            && self.hidden.is_zero()
    }
}

impl Struct for Holder {
    fn field(&self, index: usize) -> Option<&dyn Reflect> {
        match index {
            0 => Some(&self.one),
            1 => Some(&self.embed),
            2 => Some(&self.inner),
            3 => Some(&self.two),
            4 => Some(&self.hidden),
            _ => None,
        }
    }

    fn field_mut(&mut self, index: usize) -> Option<&mut dyn Reflect> {
        match index {
            0 => Some(&mut self.one),
            1 => Some(&mut self.embed),
            2 => Some(&mut self.inner),
            3 => Some(&mut self.two),
            4 => Some(&mut self.hidden),
            _ => None,
        }
    }
}
