//! Abstractions for offset pagination.

use std::{cmp, num::NonZeroUsize};

/// A page of items along with the size of the whole collection.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(rename_all = "camelCase")
)]
pub struct Page<T> {
    /// Items on this [`Page`].
    pub data: Vec<T>,

    /// Number of items in the whole collection (before slicing).
    pub total: usize,

    /// 1-based number of this [`Page`].
    pub page: NonZeroUsize,

    /// Maximum number of items on a [`Page`].
    pub limit: NonZeroUsize,

    /// Number of pages the whole collection spans.
    pub total_pages: usize,
}

impl<T> Page<T> {
    /// Slices the provided `items` into the [`Page`] requested by `args`.
    ///
    /// A page beyond the end of `items` is empty, while `total` and
    /// `total_pages` still describe the whole collection.
    #[must_use]
    pub fn paginate(items: &[T], args: Arguments) -> Self
    where
        T: Clone,
    {
        let total = items.len();
        let window = args.window(total);
        Self {
            data: items[window].to_vec(),
            total,
            page: args.page,
            limit: args.limit,
            total_pages: total.div_ceil(args.limit.get()),
        }
    }

    /// Maps items of this [`Page`] with the provided function.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            data: self.data.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            limit: self.limit,
            total_pages: self.total_pages,
        }
    }
}

/// Pagination arguments.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Arguments {
    /// 1-based number of the requested page.
    pub page: NonZeroUsize,

    /// Maximum number of items on a page.
    pub limit: NonZeroUsize,
}

impl Arguments {
    /// Creates new [`Arguments`].
    ///
    /// [`None`] is returned if either `page` or `limit` is zero.
    #[must_use]
    pub fn new(page: usize, limit: usize) -> Option<Self> {
        Some(Self {
            page: NonZeroUsize::new(page)?,
            limit: NonZeroUsize::new(limit)?,
        })
    }

    /// Creates new [`Arguments`] requesting the first `limit` items.
    #[must_use]
    pub fn first(limit: NonZeroUsize) -> Self {
        Self {
            page: NonZeroUsize::MIN,
            limit,
        }
    }

    /// Returns the number of items to skip before this page.
    #[must_use]
    pub fn offset(&self) -> usize {
        (self.page.get() - 1).saturating_mul(self.limit.get())
    }

    /// Returns the index range covered by this page in a collection of
    /// `total` items, clamped to the collection bounds.
    #[must_use]
    pub fn window(&self, total: usize) -> std::ops::Range<usize> {
        let start = cmp::min(self.offset(), total);
        let end = cmp::min(start.saturating_add(self.limit.get()), total);
        start..end
    }
}

/// Order of items.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize),
    serde(rename_all = "lowercase")
)]
pub enum Order {
    /// Ascending order.
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "asc", alias = "ascending"))]
    Ascending,

    /// Descending order.
    #[cfg_attr(feature = "serde", serde(rename = "desc", alias = "descending"))]
    Descending,
}

impl Order {
    /// Applies this [`Order`] to an ascending comparison result.
    #[must_use]
    pub const fn apply(self, ordering: cmp::Ordering) -> cmp::Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }
}

#[cfg(test)]
mod spec {
    use std::num::NonZeroUsize;

    use super::{Arguments, Order, Page};

    fn nz(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn computes_total_pages() {
        let items = (1..=23).collect::<Vec<_>>();

        let page = Page::paginate(&items, Arguments::new(1, 10).unwrap());
        assert_eq!(page.total, 23);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.data, (1..=10).collect::<Vec<_>>());

        let page = Page::paginate(&items, Arguments::new(3, 10).unwrap());
        assert_eq!(page.data, vec![21, 22, 23]);
        assert_eq!(page.page, nz(3));
        assert_eq!(page.limit, nz(10));
    }

    #[test]
    fn page_beyond_end_is_empty() {
        let items = (1..=23).collect::<Vec<_>>();

        let page = Page::paginate(&items, Arguments::new(4, 10).unwrap());
        assert!(page.data.is_empty());
        assert_eq!(page.total, 23);
        assert_eq!(page.total_pages, 3);

        let page =
            Page::paginate(&items, Arguments::new(usize::MAX, 10).unwrap());
        assert!(page.data.is_empty());
    }

    #[test]
    fn empty_collection() {
        let page = Page::<u8>::paginate(&[], Arguments::first(nz(10)));
        assert!(page.data.is_empty());
        assert_eq!(page.total, 0);
        assert_eq!(page.total_pages, 0);
    }

    #[test]
    fn rejects_zero_arguments() {
        assert!(Arguments::new(0, 10).is_none());
        assert!(Arguments::new(1, 0).is_none());
        assert_eq!(Arguments::new(2, 5).unwrap().offset(), 5);
    }

    #[test]
    fn order_applies_to_comparison() {
        use std::cmp::Ordering;

        assert_eq!(Order::Ascending.apply(Ordering::Less), Ordering::Less);
        assert_eq!(Order::Descending.apply(Ordering::Less), Ordering::Greater);
        assert_eq!(Order::Descending.apply(Ordering::Equal), Ordering::Equal);
    }
}
