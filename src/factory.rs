//! Reconstruction of concrete wrappers from native type tags.
//!
//! The runtime reports what an object is through a numeric tag; rebuilding
//! the concrete wrapper is a single exhaustive dispatch over a closed enum,
//! so a tag added on the native side fails loudly here instead of falling
//! through a chain of comparisons.

use crate::bridge::Bridge;
use crate::counted::{Capability, RefConst};
use crate::error::{Error, Result};
use crate::native::{
    TAG_BOX, TAG_CAPSULE, TAG_COMPOUND, TAG_CONVEX_HULL, TAG_CYLINDER, TAG_HEIGHT_FIELD,
    TAG_MESH, TAG_SPHERE,
};
use crate::view::TargetView;

/// The shape kinds the runtime can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeTag {
    Sphere,
    Box,
    Capsule,
    Cylinder,
    ConvexHull,
    Mesh,
    HeightField,
    Compound,
}

impl TypeTag {
    /// Decode a raw tag. Returns `None` for tags this crate does not know.
    pub fn from_raw(raw: u32) -> Option<TypeTag> {
        match raw {
            TAG_SPHERE => Some(TypeTag::Sphere),
            TAG_BOX => Some(TypeTag::Box),
            TAG_CAPSULE => Some(TypeTag::Capsule),
            TAG_CYLINDER => Some(TypeTag::Cylinder),
            TAG_CONVEX_HULL => Some(TypeTag::ConvexHull),
            TAG_MESH => Some(TypeTag::Mesh),
            TAG_HEIGHT_FIELD => Some(TypeTag::HeightField),
            TAG_COMPOUND => Some(TypeTag::Compound),
            _ => None,
        }
    }

    /// The raw tag value, as the runtime reports it.
    pub const fn raw(self) -> u32 {
        match self {
            TypeTag::Sphere => TAG_SPHERE,
            TypeTag::Box => TAG_BOX,
            TypeTag::Capsule => TAG_CAPSULE,
            TypeTag::Cylinder => TAG_CYLINDER,
            TypeTag::ConvexHull => TAG_CONVEX_HULL,
            TypeTag::Mesh => TAG_MESH,
            TypeTag::HeightField => TAG_HEIGHT_FIELD,
            TypeTag::Compound => TAG_COMPOUND,
        }
    }
}

/// A shape wrapper rebuilt from its runtime tag.
///
/// Each variant holds an owned read-only reference to the shape, so the
/// reconstructed wrapper participates in the native refcount like any other
/// [`RefConst`].
pub enum TaggedShape {
    Sphere(RefConst),
    Box(RefConst),
    Capsule(RefConst),
    Cylinder(RefConst),
    ConvexHull(RefConst),
    Mesh(RefConst),
    HeightField(RefConst),
    Compound(RefConst),
}

impl TaggedShape {
    /// The kind this wrapper was rebuilt as.
    pub fn tag(&self) -> TypeTag {
        match self {
            TaggedShape::Sphere(_) => TypeTag::Sphere,
            TaggedShape::Box(_) => TypeTag::Box,
            TaggedShape::Capsule(_) => TypeTag::Capsule,
            TaggedShape::Cylinder(_) => TypeTag::Cylinder,
            TaggedShape::ConvexHull(_) => TypeTag::ConvexHull,
            TaggedShape::Mesh(_) => TypeTag::Mesh,
            TaggedShape::HeightField(_) => TypeTag::HeightField,
            TaggedShape::Compound(_) => TypeTag::Compound,
        }
    }

    /// The reference held by this wrapper.
    pub fn as_ref_const(&self) -> &RefConst {
        match self {
            TaggedShape::Sphere(r)
            | TaggedShape::Box(r)
            | TaggedShape::Capsule(r)
            | TaggedShape::Cylinder(r)
            | TaggedShape::ConvexHull(r)
            | TaggedShape::Mesh(r)
            | TaggedShape::HeightField(r)
            | TaggedShape::Compound(r) => r,
        }
    }

    /// Unwrap into the underlying reference.
    pub fn into_ref_const(self) -> RefConst {
        match self {
            TaggedShape::Sphere(r)
            | TaggedShape::Box(r)
            | TaggedShape::Capsule(r)
            | TaggedShape::Cylinder(r)
            | TaggedShape::ConvexHull(r)
            | TaggedShape::Mesh(r)
            | TaggedShape::HeightField(r)
            | TaggedShape::Compound(r) => r,
        }
    }
}

impl Bridge {
    /// Rebuild the concrete wrapper for the object behind `view` from its
    /// runtime type tag.
    ///
    /// Takes a new read-only reference to the object; the view itself stays
    /// borrowed and non-owning.
    pub fn reconstruct<C: Capability>(&self, view: &TargetView<'_, C>) -> Result<TaggedShape> {
        assert!(!view.is_null(), "cannot reconstruct a null view");
        let raw = view.type_tag();
        let tag = TypeTag::from_raw(raw).ok_or(Error::UnknownTypeTag(raw))?;
        let r = view.to_ref_const();
        Ok(match tag {
            TypeTag::Sphere => TaggedShape::Sphere(r),
            TypeTag::Box => TaggedShape::Box(r),
            TypeTag::Capsule => TaggedShape::Capsule(r),
            TypeTag::Cylinder => TaggedShape::Cylinder(r),
            TypeTag::ConvexHull => TaggedShape::ConvexHull(r),
            TypeTag::Mesh => TaggedShape::Mesh(r),
            TypeTag::HeightField => TaggedShape::HeightField(r),
            TypeTag::Compound => TaggedShape::Compound(r),
        })
    }
}
