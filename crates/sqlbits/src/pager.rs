//! Pager contracts.
//!
//! Page size and page number usually come from the UI, so like sort orders
//! they are consumed through a trait rather than trusted raw.

/// Paging information for a query that returns one page of results.
pub trait PagedResults {
    /// Pagers and long processes may want a total regardless of paging.
    fn is_total_row_count_desired(&self) -> bool;

    /// Maximum rows per page; `0` means no limit.
    fn pager_page_size(&self) -> i64;

    /// Query offset derived from page size and requested page.
    fn pager_query_offset(&self) -> i64;
}

/// Receives the total row count of a query regardless of paging.
pub trait RowCountReceiver {
    fn set_total_row_count(&mut self, total: i64);
}
