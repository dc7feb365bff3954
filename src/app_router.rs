use web_sys::UrlSearchParams;

use greeting_core::PageConfig;

#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct QueryOverrides {
    pub(crate) cooldown_ms: Option<u32>,
    pub(crate) swipe_threshold_px: Option<f32>,
}

impl QueryOverrides {
    pub(crate) fn apply(&self, config: &mut PageConfig) {
        if let Some(cooldown_ms) = self.cooldown_ms {
            config.carousel.cooldown_ms = cooldown_ms;
        }
        if let Some(threshold) = self.swipe_threshold_px {
            config.carousel.swipe_threshold_px = threshold;
        }
    }
}

pub(crate) fn load_page_config() -> PageConfig {
    let mut config = match PageConfig::bundled() {
        Ok(config) => config,
        Err(err) => {
            gloo::console::warn!("page config rejected, using defaults", err.to_string());
            PageConfig::default()
        }
    };
    if let Some(overrides) = load_query_overrides() {
        overrides.apply(&mut config);
    }
    config
}

fn load_query_overrides() -> Option<QueryOverrides> {
    let window = web_sys::window()?;
    let search = window.location().search().ok()?;
    parse_query_overrides(&search)
}

pub(crate) fn parse_query_overrides(search: &str) -> Option<QueryOverrides> {
    let search = search.trim();
    if search.is_empty() {
        return None;
    }
    let params = UrlSearchParams::new_with_str(search).ok()?;
    let cooldown_ms = params
        .get("cooldown")
        .and_then(|raw| raw.trim().parse::<u32>().ok());
    let swipe_threshold_px = params
        .get("swipe")
        .and_then(|raw| raw.trim().parse::<f32>().ok())
        .filter(|value| value.is_finite() && *value >= 0.0);
    if cooldown_ms.is_none() && swipe_threshold_px.is_none() {
        return None;
    }
    Some(QueryOverrides {
        cooldown_ms,
        swipe_threshold_px,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn parses_cooldown_and_swipe() {
        let overrides = parse_query_overrides("?cooldown=300&swipe=80").expect("overrides");
        assert_eq!(overrides.cooldown_ms, Some(300));
        assert_eq!(overrides.swipe_threshold_px, Some(80.0));

        let mut config = PageConfig::default();
        overrides.apply(&mut config);
        assert_eq!(config.carousel.cooldown_ms, 300);
        assert_eq!(config.carousel.swipe_threshold_px, 80.0);
    }

    #[wasm_bindgen_test]
    fn ignores_garbage() {
        assert_eq!(parse_query_overrides(""), None);
        assert_eq!(parse_query_overrides("?cooldown=soon&swipe=-4"), None);
    }
}
