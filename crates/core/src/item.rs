//! Item capabilities.
//!
//! The engine treats items as opaque values. It needs exactly two things from
//! them: a total order (so re-filtering evaluates items in a deterministic
//! sequence) and, for the field string filters only, access to named string
//! fields.

/// An item trackable by stores and views.
///
/// The `Ord` bound supplies the total order used to make `refilter`
/// evaluation deterministic; it never affects which items are accepted.
pub trait Item: Clone + Ord + Send + 'static {}

impl<T: Clone + Ord + Send + 'static> Item for T {}

/// Access to an item's named string fields.
///
/// Returns `None` for unknown field names. Only the field string filters
/// consult this; views with custom policies never do.
pub trait FieldAccess {
    /// Returns the value of the named field, if the item has one.
    fn field(&self, name: &str) -> Option<&str>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, PartialEq, Eq, PartialOrd, Ord)]
    struct Member {
        display_name: &'static str,
    }

    impl FieldAccess for Member {
        fn field(&self, name: &str) -> Option<&str> {
            match name {
                "display_name" => Some(self.display_name),
                _ => None,
            }
        }
    }

    fn assert_item<T: Item>(_: &T) {}

    #[test]
    fn test_blanket_item_impl() {
        let member = Member {
            display_name: "Alice",
        };
        assert_item(&member);
    }

    #[test]
    fn test_field_access() {
        let member = Member {
            display_name: "Alice",
        };
        assert_eq!(member.field("display_name"), Some("Alice"));
        assert_eq!(member.field("avatar_url"), None);
    }
}
