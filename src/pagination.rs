use serde::de::{self, Deserializer};
use serde::ser::{SerializeStruct, Serializer};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Page size used when the client omits `size` or sends a non-positive one.
pub const DEFAULT_PAGE_SIZE: i64 = 5;

/// An item kind that can be served through a paginated listing.
pub trait Listed {
    /// JSON key the items of a page are serialized under.
    const LIST_FIELD: &'static str;
}

/// Builds the navigation link for a given page number and page size.
pub trait PageLinks {
    fn page_link(&self, page: usize, size: usize) -> String;
}

impl<F> PageLinks for F
where
    F: Fn(usize, usize) -> String,
{
    fn page_link(&self, page: usize, size: usize) -> String {
        self(page, size)
    }
}

/// Link template for a resource listing, optionally nested under a parent
/// resource (`<public>/artigos/<permalink>/comentarios`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceLinks {
    base: String,
}

impl ResourceLinks {
    pub fn collection(public_url: &str, resource: &str) -> Self {
        Self {
            base: format!("{}{}", public_url, resource),
        }
    }

    pub fn scoped(public_url: &str, parent: &str, scope: &str, resource: &str) -> Self {
        Self {
            base: format!("{}{}/{}/{}", public_url, parent, scope, resource),
        }
    }
}

impl PageLinks for ResourceLinks {
    fn page_link(&self, page: usize, size: usize) -> String {
        format!("{}?page={}&size={}", self.base, page, size)
    }
}

/// Raw paging parameters as the client sent them. Missing or empty values
/// deserialize to zero and get normalized like any other out-of-range input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PageRequest {
    #[serde(deserialize_with = "empty_as_zero")]
    pub size: i64,
    #[serde(deserialize_with = "empty_as_zero")]
    pub page: i64,
}

/// Parses a query string value, treating `?key=` like an absent key.
pub(crate) fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    let raw = String::deserialize(deserializer)?;
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse().map(Some).map_err(de::Error::custom)
}

fn empty_as_zero<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(empty_as_none(deserializer)?.unwrap_or_default())
}

impl PageRequest {
    pub fn new(size: i64, page: i64) -> Self {
        Self { size, page }
    }
}

/// One window over a collection plus the links to its neighbours.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageResult<T> {
    pub items: Vec<T>,
    pub current_page: usize,
    pub total_pages: usize,
    /// Effective size after defaulting and clamping. Not serialized.
    pub page_size: usize,
    pub prev: String,
    pub next: String,
}

impl<T> PageResult<T> {
    fn empty() -> Self {
        Self {
            items: Vec::new(),
            current_page: 0,
            total_pages: 0,
            page_size: 0,
            prev: String::new(),
            next: String::new(),
        }
    }
}

impl<T> Serialize for PageResult<T>
where
    T: Serialize + Listed,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("PageResult", 5)?;
        state.serialize_field("pagina", &self.current_page)?;
        state.serialize_field("totalPaginas", &self.total_pages)?;
        state.serialize_field("next", &self.next)?;
        state.serialize_field("prev", &self.prev)?;
        state.serialize_field(T::LIST_FIELD, &self.items)?;
        state.end()
    }
}

/// Cuts the requested page out of `collection`.
///
/// Never fails: a page below 1 becomes 1, a non-positive size becomes
/// [`DEFAULT_PAGE_SIZE`], the size is clamped to the number of items and the
/// page to the number of pages. Links are built from those effective values,
/// not from the raw request.
///
/// An empty collection yields page 0 of 0 with no items and no links.
pub fn paginate<T, L>(collection: Vec<T>, request: PageRequest, links: &L) -> PageResult<T>
where
    L: PageLinks + ?Sized,
{
    let total_items = collection.len();
    if total_items == 0 {
        return PageResult::empty();
    }

    let requested_page = request.page.max(1);
    let requested_size = if request.size <= 0 {
        DEFAULT_PAGE_SIZE
    } else {
        request.size
    };

    // both are positive here, so the conversions only fail past usize::MAX
    let size = usize::try_from(requested_size)
        .unwrap_or(usize::MAX)
        .min(total_items);
    let total_pages = total_items.div_ceil(size);
    let page = usize::try_from(requested_page)
        .unwrap_or(usize::MAX)
        .min(total_pages);

    let start = (page - 1) * size;
    let items: Vec<T> = collection.into_iter().skip(start).take(size).collect();

    let prev = if page > 1 {
        links.page_link(page - 1, size)
    } else {
        String::new()
    };
    let next = if page < total_pages {
        links.page_link(page + 1, size)
    } else {
        String::new()
    };

    PageResult {
        items,
        current_page: page,
        total_pages,
        page_size: size,
        prev,
        next,
    }
}
