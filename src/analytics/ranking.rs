use serde::Serialize;

/// Length of the top-growing and top-populated lists.
pub const TOP_N: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopCountry {
    pub country_name: String,
    pub country_code: String,
    pub value: f64,
    pub growth_rate: Option<f64>,
}

/// The `limit` items with the largest `metric`, descending.
///
/// Items whose metric is `None` are left out. Equal metrics keep their input order.
pub fn top_by<T, F>(items: &[T], limit: usize, metric: F) -> Vec<&T>
where
    F: Fn(&T) -> Option<f64>,
{
    let mut ranked: Vec<(f64, &T)> = items
        .iter()
        .filter_map(|item| metric(item).map(|score| (score, item)))
        .collect();

    ranked.sort_by(|left, right| right.0.total_cmp(&left.0));
    ranked.truncate(limit);
    ranked.into_iter().map(|(_, item)| item).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranks_descending_and_truncates() {
        let values = [3.0, 9.0, 1.0, 7.0, 5.0];
        let top = top_by(&values, 3, |v| Some(*v));
        assert_eq!(top, vec![&9.0, &7.0, &5.0]);
    }

    #[test]
    fn ties_keep_input_order_and_none_is_skipped() {
        let items = [("a", Some(2.0)), ("b", None), ("c", Some(5.0)), ("d", Some(2.0))];
        let top: Vec<&str> = top_by(&items, TOP_N, |item| item.1)
            .into_iter()
            .map(|item| item.0)
            .collect();
        assert_eq!(top, vec!["c", "a", "d"]);
    }
}
