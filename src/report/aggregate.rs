use std::collections::HashMap;

use crate::calories::calories_for;
use crate::report::collate::locale_cmp;
use crate::report::types::{
    FoodPopularityEntry, OrderLine, OrderRecord, Report, UserOrderSummary,
};

/// Per-call accumulation state. Both groupings keep first-seen order.
#[derive(Default)]
struct Accumulator {
    user_index: HashMap<String, usize>,
    users: Vec<(String, Vec<OrderLine>)>,
    food_index: HashMap<String, usize>,
    foods: Vec<FoodPopularityEntry>,
}

impl Accumulator {
    fn push(&mut self, record: OrderRecord) {
        let total_calories = calories_for(&record.food_name) * record.quantity;

        let food = match self.food_index.get(&record.food_name) {
            Some(&i) => i,
            None => {
                let i = self.foods.len();
                self.food_index.insert(record.food_name.clone(), i);
                self.foods.push(FoodPopularityEntry {
                    label: record.food_name.clone(),
                    value: 0.0,
                });
                i
            }
        };
        self.foods[food].value += record.quantity;

        let line = OrderLine {
            food_name: record.food_name,
            quantity: record.quantity,
            total_calories,
        };

        match self.user_index.get(&record.email) {
            Some(&i) => self.users[i].1.push(line),
            None => {
                self.user_index.insert(record.email.clone(), self.users.len());
                self.users.push((record.email, vec![line]));
            }
        }
    }

    fn finish(self) -> Report {
        let sorted_user_orders = self
            .users
            .into_iter()
            .map(|(email, mut orders)| {
                orders.sort_by(|a, b| locale_cmp(&a.food_name, &b.food_name));
                let calorie_count: f64 = orders.iter().map(|o| o.total_calories).sum();
                UserOrderSummary {
                    email,
                    orders,
                    calorie_count,
                }
            })
            .collect();

        Report {
            sorted_user_orders,
            pie_chart_data: self.foods,
        }
    }
}

/// Folds a stream of order rows into a [`Report`].
///
/// Each row adds one order line to its user and its quantity to its food's
/// popularity total. The first error aborts the fold and nothing accumulated
/// so far is returned.
pub fn aggregate_rows<I, E>(rows: I) -> Result<Report, E>
where
    I: IntoIterator<Item = Result<OrderRecord, E>>,
{
    let mut acc = Accumulator::default();
    for row in rows {
        acc.push(row?);
    }
    Ok(acc.finish())
}
