use std::collections::HashMap;

use url::form_urlencoded;

#[derive(Debug, Default)]
pub struct ParsedParams {
    values: HashMap<String, Vec<String>>,
}

impl ParsedParams {
    pub fn from_raw(raw_query: Option<&str>) -> Self {
        let mut values: HashMap<String, Vec<String>> = HashMap::new();

        if let Some(raw) = raw_query {
            for (key, value) in form_urlencoded::parse(raw.as_bytes()) {
                values
                    .entry(key.into_owned())
                    .or_default()
                    .push(value.into_owned());
            }
        }

        Self { values }
    }

    pub fn get_optional_string(&self, key: &str) -> Option<String> {
        self.values.get(key).and_then(|list| list.first()).cloned()
    }

    // Case-insensitive "true"/"false"; anything else (including absence)
    // is the undefined default and the renderer decides.
    pub fn get_boolean_value(&self, key: &str) -> Option<bool> {
        let value = self.get_optional_string(key)?;

        if value.eq_ignore_ascii_case("true") {
            Some(true)
        } else if value.eq_ignore_ascii_case("false") {
            Some(false)
        } else {
            None
        }
    }

    // `None` is the not-a-number sentinel; it is forwarded to the renderer
    // untouched rather than being replaced here.
    pub fn get_number_value(&self, key: &str) -> Option<i32> {
        self.get_optional_string(key)
            .and_then(|value| value.trim().parse::<i32>().ok())
    }

    pub fn get_float_value(&self, key: &str) -> Option<f64> {
        self.get_optional_string(key)
            .and_then(|value| value.trim().parse::<f64>().ok())
    }

    pub fn get_all(&self, key: &str) -> Vec<String> {
        self.values.get(key).cloned().unwrap_or_default()
    }

    pub fn get_all_csv(&self, key: &str) -> Vec<String> {
        self.get_all(key)
            .into_iter()
            .flat_map(|item| {
                item.split(',')
                    .map(str::trim)
                    .filter(|segment| !segment.is_empty())
                    .map(str::to_string)
                    .collect::<Vec<_>>()
            })
            .collect()
    }

    // Lower-cased only when present; absence passes through so the
    // downstream default applies.
    pub fn get_locale(&self, key: &str) -> Option<String> {
        self.get_optional_string(key)
            .map(|value| value.to_lowercase())
    }
}
