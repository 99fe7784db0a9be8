use folio_core::Pagination;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::content::PageArgs;

/// Compute effective limit with precedence: local arg -> global flag -> fallback.
#[must_use]
pub fn effective_limit(local: Option<u32>, global: Option<u32>, fallback: u32) -> u32 {
    local.or(global).unwrap_or(fallback)
}

/// The listing window for `--skip`/`--page-size`, falling back to `--limit`
/// and then `fallback`.
#[must_use]
pub fn window(args: &PageArgs, flags: &GlobalFlags, fallback: u32) -> Pagination {
    Pagination::new(args.skip, effective_limit(args.page_size, flags.limit, fallback))
}
