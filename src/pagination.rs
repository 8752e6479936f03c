//! Cursor pagination for NerdGraph searches

use crate::error::Result;
use std::future::Future;

/// One page of a cursor-based search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CursorPage<T> {
    pub items: Vec<T>,
    /// Cursor for the following page; `None` or empty ends the search
    pub next_cursor: Option<String>,
}

impl<T> CursorPage<T> {
    pub fn new(items: Vec<T>, next_cursor: Option<String>) -> Self {
        Self { items, next_cursor }
    }
}

/// Fetch pages until the server stops returning a cursor
///
/// The first call receives `None`. Items are concatenated in page order.
pub async fn paginate_cursor<T, F, Fut>(mut fetch_page: F) -> Result<Vec<T>>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<CursorPage<T>>>,
{
    let mut out = Vec::new();
    let mut cursor: Option<String> = None;
    let mut pages = 0usize;

    loop {
        let page = fetch_page(cursor.take()).await?;
        pages += 1;
        out.extend(page.items);

        match page.next_cursor {
            Some(next) if !next.is_empty() => cursor = Some(next),
            _ => break,
        }
    }

    tracing::debug!("Cursor pagination finished after {} pages, {} items", pages, out.len());
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::cell::RefCell;

    #[tokio::test]
    async fn test_single_page() {
        let items = paginate_cursor(|cursor| async move {
            assert!(cursor.is_none());
            Ok(CursorPage::new(vec![1, 2, 3], None))
        })
        .await
        .unwrap();
        assert_eq!(items, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_follows_cursors_in_order() {
        let seen = RefCell::new(Vec::new());
        let items = paginate_cursor(|cursor| {
            seen.borrow_mut().push(cursor.clone());
            async move {
                Ok(match cursor.as_deref() {
                    None => CursorPage::new(vec!["a"], Some("c1".to_string())),
                    Some("c1") => CursorPage::new(vec!["b", "c"], Some("c2".to_string())),
                    _ => CursorPage::new(vec!["d"], Some(String::new())),
                })
            }
        })
        .await
        .unwrap();

        assert_eq!(items, vec!["a", "b", "c", "d"]);
        assert_eq!(
            seen.into_inner(),
            vec![None, Some("c1".to_string()), Some("c2".to_string())]
        );
    }

    #[tokio::test]
    async fn test_error_stops_pagination() {
        let result: Result<Vec<u8>> = paginate_cursor(|cursor| async move {
            match cursor {
                None => Ok(CursorPage::new(vec![1], Some("next".to_string()))),
                Some(_) => Err(Error::InvalidResponse("boom".to_string())),
            }
        })
        .await;
        assert!(matches!(result, Err(Error::InvalidResponse(_))));
    }
}
