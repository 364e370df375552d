use pinergy_core::{CompareDatum, CompareResponse, LevelPayUsage, UsageResponse, UsageSample};

use super::{add_limited, date, euro, table, titled, Report};

const USAGE_ROWS: usize = 15;

fn period_table(name: &str, samples: &[UsageSample]) -> String {
    let mut t = table(&["Date", "kWh", "Amount", "CO2"]);
    let rows = samples.iter().map(|sample| {
        vec![
            date(sample.date),
            format!("{:.2}", sample.kwh),
            euro(sample.amount),
            format!("{:.2}", sample.co2),
        ]
    });
    add_limited(&mut t, rows, samples.len(), USAGE_ROWS, 4);
    titled(&format!("Usage - {name}"), &t)
}

impl Report for UsageResponse {
    fn render(&self) -> String {
        let tables: Vec<String> = [("Day", &self.day), ("Week", &self.week), ("Month", &self.month)]
            .into_iter()
            .filter(|(_, samples)| !samples.is_empty())
            .map(|(name, samples)| period_table(name, samples))
            .collect();
        if tables.is_empty() {
            "No usage data.".to_string()
        } else {
            tables.join("\n\n")
        }
    }
}

impl Report for LevelPayUsage {
    fn render(&self) -> String {
        if self.usage_data.is_empty() {
            return "No usage data.".to_string();
        }
        let data = serde_json::to_string_pretty(&self.usage_data).unwrap_or_default();
        format!("Level Pay usage data:\n{data}")
    }
}

fn datum_row(period: &str, kind: &str, datum: &CompareDatum) -> Vec<String> {
    vec![
        period.to_string(),
        kind.to_string(),
        format!("{:.2}", datum.users_home),
        format!("{:.2}", datum.average_home),
    ]
}

impl Report for CompareResponse {
    fn render(&self) -> String {
        let mut t = table(&["Period", "Type", "Your home", "Average home"]);
        for (name, period) in [("Month", &self.month), ("Week", &self.week)] {
            let Some(period) = period else { continue };
            if let Some(kwh) = &period.kwh {
                let _ = t.add_row(datum_row(name, "kWh", kwh));
            }
            if let Some(co2) = &period.co2 {
                let _ = t.add_row(datum_row(name, "CO2", co2));
            }
        }
        titled("Compare", &t)
    }
}
