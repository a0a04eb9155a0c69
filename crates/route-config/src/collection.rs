//! The collection decoder and the collections it fills.
//!
//! [`decode_collection`] is the one mechanism behind every top-level and
//! nested collection of a document: it finds the wrapping container of an
//! element kind, decodes each instance in document order and inserts it into
//! the kind's [`Collection`]. A missing wrapper yields an empty collection;
//! the first failing element aborts the walk.

use roxmltree::Node;
use serde::{Serialize, Serializer};
use std::collections::HashMap;

use crate::attributes::check_required;
use crate::element::Element;
use crate::error::{ConfigError, Result};

/// A container that decoded elements are inserted into.
pub trait Collection<T> {
    /// Adds one element, enforcing the collection's uniqueness policy.
    fn insert(&mut self, element: T) -> Result<()>;
}

/// Unkeyed elements are kept in document order with no uniqueness check.
impl<T> Collection<T> for Vec<T> {
    fn insert(&mut self, element: T) -> Result<()> {
        self.push(element);
        Ok(())
    }
}

/// Elements that may be looked up by name.
pub trait Named {
    /// Name of the element, or `None` if it is anonymous.
    ///
    /// Anonymous elements are never considered duplicates of each other.
    fn name(&self) -> Option<&str>;
}

/// Owning collection of named elements, in document order, indexed by name.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedCollection<T> {
    items: Vec<T>,
    index: HashMap<String, usize>,
}

impl<T> Default for NamedCollection<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<T: Named> NamedCollection<T> {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks an element up by name.
    pub fn get(&self, name: &str) -> Option<&T> {
        self.index.get(name).map(|&i| &self.items[i])
    }

    /// Returns `true` if an element with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Iterates over elements in document order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Names of the named elements, in document order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.items.iter().filter_map(Named::name)
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the collection holds no elements.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Adds an element, returning it back if its name is already taken.
    pub fn try_push(&mut self, element: T) -> std::result::Result<(), T> {
        if let Some(name) = element.name() {
            if self.index.contains_key(name) {
                return Err(element);
            }
            self.index.insert(name.to_string(), self.items.len());
        }
        self.items.push(element);
        Ok(())
    }
}

impl<T: Named + Element> Collection<T> for NamedCollection<T> {
    fn insert(&mut self, element: T) -> Result<()> {
        self.try_push(element).map_err(|rejected| {
            ConfigError::duplicate(T::TAG, rejected.name().unwrap_or_default())
        })
    }
}

impl<'a, T: Named> IntoIterator for &'a NamedCollection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Serialize> Serialize for NamedCollection<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.items.serialize(serializer)
    }
}

/// Element children of `parent` carrying `tag`.
pub(crate) fn children_tagged<'a, 'input>(
    parent: Node<'a, 'input>,
    tag: &'static str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    parent
        .children()
        .filter(move |child| child.is_element() && child.tag_name().name() == tag)
}

/// Decodes every `E` under `parent` into `E::Collection`.
///
/// Instances are searched inside each `E::COLLECTION_TAG` child of `parent`,
/// or directly under `parent` when the two tags coincide. Required attributes
/// are checked against `E::ATTRIBUTES` before `E::decode` runs.
pub fn decode_collection<E: Element>(
    parent: Node<'_, '_>,
    ctx: E::Context<'_>,
) -> Result<E::Collection> {
    let mut collection = E::Collection::default();
    let mut count = 0usize;

    let wrappers: Vec<Node<'_, '_>> = if E::TAG == E::COLLECTION_TAG {
        vec![parent]
    } else {
        children_tagged(parent, E::COLLECTION_TAG).collect()
    };

    for wrapper in wrappers {
        for node in children_tagged(wrapper, E::TAG) {
            check_required(E::TAG, E::ATTRIBUTES, node)?;
            let element = E::decode(node, ctx)?;
            collection.insert(element)?;
            count += 1;
        }
    }

    tracing::debug!("decode_collection: {count} <{}> elements", E::TAG);
    Ok(collection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::{AttributeSpec, Attributes};

    #[derive(Debug, PartialEq)]
    struct Item {
        name: Option<String>,
        weight: u32,
    }

    impl Named for Item {
        fn name(&self) -> Option<&str> {
            self.name.as_deref()
        }
    }

    impl Element for Item {
        const TAG: &'static str = "Item";
        const COLLECTION_TAG: &'static str = "Items";
        const ATTRIBUTES: &'static [AttributeSpec] = &[
            AttributeSpec::optional("name"),
            AttributeSpec::required("weight"),
        ];
        type Context<'c> = u32;
        type Collection = NamedCollection<Item>;

        fn decode(node: Node<'_, '_>, offset: u32) -> Result<Self> {
            let attrs = Attributes::new(Self::TAG, Self::ATTRIBUTES, node);
            Ok(Self {
                name: attrs.optional("name").map(str::to_string),
                weight: attrs.require_uint("weight")? + offset,
            })
        }
    }

    /// Same elements, but listed directly under the parent.
    #[derive(Debug)]
    struct FlatItem(u32);

    impl Element for FlatItem {
        const TAG: &'static str = "Item";
        const COLLECTION_TAG: &'static str = "Item";
        const ATTRIBUTES: &'static [AttributeSpec] = &[AttributeSpec::required("weight")];
        type Context<'c> = ();
        type Collection = Vec<FlatItem>;

        fn decode(node: Node<'_, '_>, (): ()) -> Result<Self> {
            Attributes::new(Self::TAG, Self::ATTRIBUTES, node)
                .require_uint("weight")
                .map(FlatItem)
        }
    }

    fn decode(xml: &str) -> Result<NamedCollection<Item>> {
        let doc = roxmltree::Document::parse(xml).unwrap();
        decode_collection::<Item>(doc.root_element(), 0)
    }

    #[test]
    fn decodes_in_document_order() {
        let items = decode(
            r#"<Root><Items><Item name="b" weight="2"/><Other/><Item name="a" weight="1"/></Items></Root>"#,
        )
        .unwrap();
        assert_eq!(items.names().collect::<Vec<_>>(), vec!["b", "a"]);
        assert_eq!(items.get("a").map(|i| i.weight), Some(1));
    }

    #[test]
    fn missing_wrapper_is_empty() {
        let items = decode("<Root><Unrelated/></Root>").unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn elements_outside_wrapper_are_ignored() {
        let items = decode(r#"<Root><Item name="x" weight="1"/><Items/></Root>"#).unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn several_wrappers_accumulate() {
        let items = decode(
            r#"<Root><Items><Item name="a" weight="1"/></Items><Items><Item name="b" weight="2"/></Items></Root>"#,
        )
        .unwrap();
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn duplicate_name_aborts() {
        let err = decode(
            r#"<Root><Items><Item name="a" weight="1"/><Item name="a" weight="2"/></Items></Root>"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateName { element: "Item", ref name } if name == "a"));
    }

    #[test]
    fn anonymous_elements_are_never_duplicates() {
        let items = decode(r#"<Root><Items><Item weight="1"/><Item weight="2"/></Items></Root>"#)
            .unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items.names().count(), 0);
    }

    #[test]
    fn missing_required_attribute_aborts() {
        let err = decode(r#"<Root><Items><Item name="a"/></Items></Root>"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::MissingRequiredAttribute { element: "Item", attribute: "weight" }
        ));
    }

    #[test]
    fn context_reaches_every_element() {
        let doc = roxmltree::Document::parse(
            r#"<Root><Items><Item name="a" weight="1"/><Item name="b" weight="2"/></Items></Root>"#,
        )
        .unwrap();
        let items = decode_collection::<Item>(doc.root_element(), 10).unwrap();
        let weights: Vec<_> = items.iter().map(|i| i.weight).collect();
        assert_eq!(weights, vec![11, 12]);
    }

    #[test]
    fn flat_collections_read_direct_children() {
        let doc = roxmltree::Document::parse(r#"<Root><Item weight="3"/><Item weight="4"/></Root>"#)
            .unwrap();
        let items = decode_collection::<FlatItem>(doc.root_element(), ()).unwrap();
        assert_eq!(items.iter().map(|i| i.0).collect::<Vec<_>>(), vec![3, 4]);
    }

    #[test]
    fn try_push_hands_back_duplicates() {
        let mut items = NamedCollection::new();
        assert!(items.try_push(Item { name: Some("a".into()), weight: 1 }).is_ok());
        let rejected = items
            .try_push(Item { name: Some("a".into()), weight: 2 })
            .unwrap_err();
        assert_eq!(rejected.weight, 2);
        assert_eq!(items.len(), 1);
    }
}
