use pinergy_core::{ActiveTopUpsResponse, BalanceResponse, TopUpHistoryResponse, TopUpRule};

use super::{add_limited, date, euro, table, titled, Report};

const HISTORY_ROWS: usize = 30;

impl Report for BalanceResponse {
    fn render(&self) -> String {
        let mut t = table(&["Field", "Value"]);
        let rows = [
            ("Balance", euro(self.balance)),
            ("Credit low", self.credit_low.to_string()),
            ("Emergency credit", self.emergency_credit.to_string()),
            ("Power off", self.power_off.to_string()),
            ("Top up in days", self.top_up_in_days.to_string()),
            ("Last top up amount", euro(self.last_top_up_amount)),
            ("Last top up", date(self.last_top_up_time)),
        ];
        for (field, value) in rows {
            let _ = t.add_row(vec![field.to_string(), value]);
        }
        if self.pending_top_up {
            let _ = t.add_row(vec![
                "Pending top up".to_string(),
                self.pending_top_up_by.clone(),
            ]);
        }
        titled("Balance", &t)
    }
}

fn rule_row(kind: &str, rule: &TopUpRule) -> Vec<String> {
    vec![
        kind.to_string(),
        rule.customer.clone(),
        euro(rule.top_up_amount),
        rule.top_up_day.to_string(),
        rule.top_up_threshold.to_string(),
    ]
}

impl Report for ActiveTopUpsResponse {
    fn render(&self) -> String {
        if self.auto_top_ups.is_empty() && self.scheduled.is_empty() {
            return "No active top-ups.".to_string();
        }
        let mut t = table(&["Type", "Customer", "Amount", "Day", "Threshold"]);
        for rule in &self.auto_top_ups {
            let _ = t.add_row(rule_row("auto", rule));
        }
        for rule in &self.scheduled {
            let _ = t.add_row(rule_row("scheduled", rule));
        }
        titled("Active top-ups", &t)
    }
}

impl Report for TopUpHistoryResponse {
    fn render(&self) -> String {
        if self.top_ups.is_empty() {
            return "No top-up history.".to_string();
        }
        let mut t = table(&["ID", "Amount", "Date", "Action", "Code"]);
        let rows = self.top_ups.iter().map(|record| {
            vec![
                record.top_up_id.clone(),
                euro(record.top_up_amount),
                date(record.top_up_date),
                record.top_up_action.clone(),
                record.top_up_code.clone(),
            ]
        });
        add_limited(&mut t, rows, self.top_ups.len(), HISTORY_ROWS, 5);
        titled("Top-up history", &t)
    }
}
