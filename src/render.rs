//! Text presentation of view-state snapshots
//!
//! Pure functions of state: the empty list and the error case must read
//! differently, and every error view carries a retry hint.

use crate::share;
use crate::viewmodel::{DetailViewState, ListViewState, LoadState};

pub const LOADING_LINE: &str = "Loading...";
pub const EMPTY_LIST_LINE: &str = "No products available";
pub const RETRY_HINT: &str = "Retry to load again.";

pub fn render_list(state: &ListViewState) -> String {
    match &state.load {
        LoadState::Loading => LOADING_LINE.to_string(),
        LoadState::Failed(message) => render_error(message),
        LoadState::Loaded(products) if products.is_empty() => EMPTY_LIST_LINE.to_string(),
        LoadState::Loaded(products) => products
            .iter()
            .map(|p| format!("[{}] {}\n    {}", p.id, p.title, p.summary))
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

pub fn render_detail(state: &DetailViewState) -> String {
    match &state.load {
        LoadState::Loading => LOADING_LINE.to_string(),
        LoadState::Failed(message) => render_error(message),
        LoadState::Loaded(detail) => format!(
            "{}\n{}\n\n{}\n\n{}\n\nShare: {}",
            detail.title,
            detail.price,
            detail.summary,
            detail.description,
            share::shareable_text(state)
        ),
    }
}

fn render_error(message: &str) -> String {
    format!("Error: {}\n{}", message, RETRY_HINT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stub::fixtures::sample_catalog;

    #[test]
    fn test_empty_list_differs_from_error() {
        let empty = render_list(&ListViewState {
            load: LoadState::Loaded(Vec::new()),
        });
        let failed = render_list(&ListViewState {
            load: LoadState::Failed("Failed to fetch products: 500".into()),
        });

        assert_eq!(empty, EMPTY_LIST_LINE);
        assert!(failed.contains("Failed to fetch products: 500"));
        assert!(failed.contains(RETRY_HINT));
    }

    #[test]
    fn test_list_renders_in_order() {
        let products = sample_catalog().iter().map(|d| d.to_summary()).collect();
        let text = render_list(&ListViewState {
            load: LoadState::Loaded(products),
        });

        let bananas = text.find("Bananas").unwrap();
        let apples = text.find("Apples").unwrap();
        assert!(bananas < apples);
    }

    #[test]
    fn test_detail_includes_share_line() {
        let state = DetailViewState {
            load: LoadState::Loaded(sample_catalog().remove(1)),
            city_name: "Unknown".into(),
        };

        let text = render_detail(&state);

        assert!(text.starts_with("Apples\n"));
        assert!(text.ends_with("Share: Apples - $1.29/lb from Unknown added to list"));
        assert_eq!(render_detail(&DetailViewState::loading()), LOADING_LINE);
    }
}
