//! Identifier for a bound input inside a [`MaskStore`](crate::MaskStore).
//!
//! The store never interprets the value; hosts map their own widget or DOM
//! ids onto it at the routing boundary.

use std::fmt;

/// Opaque handle naming one masked field.
///
/// ```ignore
/// // In a host integration layer:
/// impl From<WidgetId> for FieldId {
///     fn from(id: WidgetId) -> Self {
///         FieldId::from_raw(id.index() as u64)
///     }
/// }
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FieldId(u64);

impl FieldId {
    #[inline]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn as_raw(self) -> u64 {
        self.0
    }
}

impl From<u64> for FieldId {
    #[inline]
    fn from(raw: u64) -> Self {
        Self::from_raw(raw)
    }
}

impl From<u32> for FieldId {
    #[inline]
    fn from(raw: u32) -> Self {
        Self::from_raw(u64::from(raw))
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "field#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn field_id_keeps_raw_value() {
        assert_eq!(FieldId::from_raw(7).as_raw(), 7);
        assert_eq!(FieldId::from(9u32), FieldId::from_raw(9));
    }

    #[test]
    fn field_ids_order_by_raw_value() {
        let ids: BTreeSet<_> = [3u64, 1, 2, 1].into_iter().map(FieldId::from).collect();
        let raw: Vec<u64> = ids.into_iter().map(FieldId::as_raw).collect();
        assert_eq!(raw, vec![1, 2, 3]);
    }

    #[test]
    fn field_id_display_names_the_field() {
        assert_eq!(FieldId::from_raw(42).to_string(), "field#42");
    }
}
