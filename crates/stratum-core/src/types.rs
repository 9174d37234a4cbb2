//! Type tags and the declared type hierarchy used for layout dispatch
//!
//! Layouts are registered against type tags for the root, the request and
//! the context resource. A lookup tries the most specific tag first and then
//! walks the declared supertypes, ending with [`TypeTag::ANY`].

use serde::Serialize;
use std::borrow::Cow;
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Name of a resource, root or request type
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct TypeTag(Cow<'static, str>);

impl TypeTag {
    /// The universal supertype; matches every type
    pub const ANY: TypeTag = TypeTag(Cow::Borrowed("*"));

    /// Base type of every request
    pub const REQUEST: TypeTag = TypeTag(Cow::Borrowed("request"));

    /// Create a tag from an owned or borrowed name
    pub fn new(name: impl Into<String>) -> Self {
        Self(Cow::Owned(name.into()))
    }

    /// Create a tag from a static name without allocating
    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    /// Request type of requests matched by the named route
    pub fn route(route_name: &str) -> Self {
        Self::new(format!("route:{}", route_name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_any(&self) -> bool {
        *self == Self::ANY
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TypeTag {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for TypeTag {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

/// Declared supertypes per type tag
#[derive(Debug, Clone, Default)]
pub struct TypeHierarchy {
    supertypes: HashMap<TypeTag, Vec<TypeTag>>,
}

impl TypeHierarchy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare `tag` with the given supertypes
    ///
    /// Supertypes are appended in declaration order; declaring the same
    /// supertype twice keeps the first position.
    pub fn declare(&mut self, tag: TypeTag, supertypes: impl IntoIterator<Item = TypeTag>) {
        let entry = self.supertypes.entry(tag).or_default();
        for supertype in supertypes {
            if !supertype.is_any() && !entry.contains(&supertype) {
                entry.push(supertype);
            }
        }
    }

    /// Direct supertypes of `tag` in declaration order
    pub fn supertypes(&self, tag: &TypeTag) -> &[TypeTag] {
        self.supertypes.get(tag).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_declared(&self, tag: &TypeTag) -> bool {
        self.supertypes.contains_key(tag)
    }

    /// Tags to try for `tag`, most specific first
    ///
    /// The tag itself, then every supertype once, then [`TypeTag::ANY`].
    /// No type comes before one of its own subtypes, so a type shared by two
    /// branches of a diamond is tried after both. Where that leaves a choice,
    /// supertypes follow declaration order.
    pub fn resolution_order(&self, tag: &TypeTag) -> Vec<TypeTag> {
        let mut order = Vec::new();
        let mut seen = HashSet::new();
        if !tag.is_any() {
            self.visit(tag, &mut order, &mut seen);
        }
        // post-order reversed is a topological order
        order.reverse();
        order.push(TypeTag::ANY);
        order
    }

    /// Whether `tag` is `ancestor` or inherits from it
    pub fn is_subtype(&self, tag: &TypeTag, ancestor: &TypeTag) -> bool {
        ancestor.is_any() || self.resolution_order(tag).contains(ancestor)
    }

    fn visit(&self, tag: &TypeTag, order: &mut Vec<TypeTag>, seen: &mut HashSet<TypeTag>) {
        if !seen.insert(tag.clone()) {
            return;
        }
        for supertype in self.supertypes(tag).iter().rev() {
            self.visit(supertype, order, seen);
        }
        order.push(tag.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag(name: &str) -> TypeTag {
        TypeTag::from(name)
    }

    fn hierarchy() -> TypeHierarchy {
        let mut types = TypeHierarchy::new();
        types.declare(tag("folder"), [tag("container"), tag("item")]);
        types.declare(tag("container"), [tag("item")]);
        types.declare(tag("site"), [tag("folder")]);
        types
    }

    #[test]
    fn test_resolution_order_unknown_tag() {
        let types = TypeHierarchy::new();
        let order = types.resolution_order(&tag("page"));
        assert_eq!(order, vec![tag("page"), TypeTag::ANY]);
    }

    #[test]
    fn test_resolution_order_nested_supertypes() {
        let types = hierarchy();
        let order: Vec<String> = types
            .resolution_order(&tag("site"))
            .iter()
            .map(|t| t.to_string())
            .collect();
        assert_eq!(order, vec!["site", "folder", "container", "item", "*"]);
    }

    #[test]
    fn test_resolution_order_diamond() {
        let mut types = TypeHierarchy::new();
        types.declare(tag("page"), [tag("article"), tag("media")]);
        types.declare(tag("article"), [tag("item")]);
        types.declare(tag("media"), [tag("item")]);

        let order: Vec<String> = types
            .resolution_order(&tag("page"))
            .iter()
            .map(|t| t.to_string())
            .collect();
        assert_eq!(order, vec!["page", "article", "media", "item", "*"]);
    }

    #[test]
    fn test_resolution_order_subtypes_first() {
        let mut types = TypeHierarchy::new();
        types.declare(tag("page"), [tag("item"), tag("media")]);
        types.declare(tag("media"), [tag("item")]);

        let order = types.resolution_order(&tag("page"));
        let position = |name: &str| order.iter().position(|t| t.as_str() == name).unwrap();
        assert!(position("media") < position("item"));
        assert_eq!(order.len(), 4);
    }

    #[test]
    fn test_resolution_order_any() {
        let types = hierarchy();
        assert_eq!(types.resolution_order(&TypeTag::ANY), vec![TypeTag::ANY]);
    }

    #[test]
    fn test_cyclic_declaration_terminates() {
        let mut types = TypeHierarchy::new();
        types.declare(tag("a"), [tag("b")]);
        types.declare(tag("b"), [tag("a")]);
        let order = types.resolution_order(&tag("a"));
        assert_eq!(order, vec![tag("a"), tag("b"), TypeTag::ANY]);
    }

    #[test]
    fn test_declare_ignores_duplicates_and_any() {
        let mut types = TypeHierarchy::new();
        types.declare(tag("a"), [tag("b"), TypeTag::ANY, tag("b")]);
        assert_eq!(types.supertypes(&tag("a")), &[tag("b")]);
    }

    #[test]
    fn test_is_subtype() {
        let types = hierarchy();
        assert!(types.is_subtype(&tag("site"), &tag("item")));
        assert!(types.is_subtype(&tag("item"), &TypeTag::ANY));
        assert!(!types.is_subtype(&tag("item"), &tag("site")));
    }

    #[test]
    fn test_route_tag() {
        assert_eq!(TypeTag::route("admin").as_str(), "route:admin");
    }
}
