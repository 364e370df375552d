use pinergy_core::{ConfigInfoResponse, DefaultsInfoResponse, NamedOption};

use super::{table, titled, Report};

fn list(values: &[i64]) -> String {
    let items: Vec<String> = values.iter().map(ToString::to_string).collect();
    format!("[{}]", items.join(", "))
}

fn options(values: &[NamedOption]) -> String {
    values
        .iter()
        .map(|option| format!("{}: {}", option.id, option.name))
        .collect::<Vec<_>>()
        .join("\n")
}

impl Report for ConfigInfoResponse {
    fn render(&self) -> String {
        let mut t = table(&["Key", "Value"]);
        let rows = [
            ("top_up_amounts", &self.top_up_amounts),
            ("auto_up_amounts", &self.auto_up_amounts),
            ("scheduled_top_up_amounts", &self.scheduled_top_up_amounts),
            ("thresholds", &self.thresholds),
        ];
        for (key, values) in rows {
            let _ = t.add_row(vec![key.to_string(), list(values)]);
        }
        titled("Config", &t)
    }
}

impl Report for DefaultsInfoResponse {
    fn render(&self) -> String {
        let mut t = table(&["Key", "Value"]);
        let numbers = [
            ("default_adults", self.default_adults),
            ("default_bedrooms", self.default_bedrooms),
            ("default_children", self.default_children),
            ("max_adults", self.max_adults),
            ("max_bedrooms", self.max_bedrooms),
            ("max_children", self.max_children),
        ];
        for (key, value) in numbers {
            let _ = t.add_row(vec![key.to_string(), value.to_string()]);
        }
        let _ = t.add_row(vec!["heating_types".to_string(), options(&self.heating_types)]);
        let _ = t.add_row(vec!["house_types".to_string(), options(&self.house_types)]);
        titled("Defaults", &t)
    }
}
