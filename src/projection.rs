//! Collapses the in-memory list into what gets written to disk.

use crate::customer::Customer;
use std::collections::HashMap;

/// One record per distinct id. Each id sits where it first appeared; its
/// fields come from its last appearance.
#[must_use]
pub fn project(customers: &[Customer]) -> Vec<Customer> {
    let mut slots: HashMap<i64, usize> = HashMap::with_capacity(customers.len());
    let mut out: Vec<Customer> = Vec::with_capacity(customers.len());
    for customer in customers {
        match slots.get(&customer.id) {
            Some(&slot) => out[slot].clone_from(customer),
            None => {
                slots.insert(customer.id, out.len());
                out.push(customer.clone());
            }
        }
    }
    out
}
