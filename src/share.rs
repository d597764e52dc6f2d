//! Share message formatting

use crate::viewmodel::DetailViewState;

/// Builds the "added to list" message for the loaded product.
///
/// Example output: `"Bananas - $0.59/lb from Unknown added to list"`.
/// Returns an empty string while no product detail is loaded.
pub fn shareable_text(state: &DetailViewState) -> String {
    match state.product_detail() {
        Some(detail) => format_share_message(&detail.title, &detail.price, state.city_name()),
        None => String::new(),
    }
}

pub fn format_share_message(title: &str, price: &str, city_name: &str) -> String {
    format!("{} - {} from {} added to list", title, price, city_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stub::fixtures::sample_catalog;
    use crate::viewmodel::LoadState;

    #[test]
    fn test_unloaded_state_shares_nothing() {
        assert_eq!(shareable_text(&DetailViewState::loading()), "");

        let failed = DetailViewState {
            load: LoadState::Failed("Failed to fetch product detail: 404".into()),
            city_name: "Detroit".into(),
        };
        assert_eq!(shareable_text(&failed), "");
    }

    #[test]
    fn test_loaded_state_formats_message() {
        let bananas = sample_catalog().remove(0);
        let state = DetailViewState {
            load: LoadState::Loaded(bananas),
            city_name: "Unknown".into(),
        };

        assert_eq!(
            shareable_text(&state),
            "Bananas - $0.59/lb from Unknown added to list"
        );
    }
}
