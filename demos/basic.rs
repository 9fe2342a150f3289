use customer_store::{Customer, CustomerStore};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .init();

    let path = std::env::temp_dir().join("customer_store_demo_basic.json");
    let _ = std::fs::remove_file(&path);

    // missing file: logged, store starts empty
    let store = CustomerStore::builder(&path).pretty(true).build();

    store.modify_customer_info(Customer::new(1, "Kim", 0).with_allergens(["peanut", "milk"]));
    store.modify_customer_info(Customer::new(2, "Lee", 2));

    // same id again: file keeps one entry, memory keeps both
    store.modify_customer_info(Customer::new(1, "Kim", 1));

    println!("in memory = {}", store.len());
    for c in store.persisted() {
        println!(
            "#{} {:<5} coupons={} peanut-allergic={}",
            c.id,
            c.name,
            c.coupon,
            c.is_allergic_to("peanut")
        );
    }

    match std::fs::read_to_string(&path) {
        Ok(raw) => println!("{raw}"),
        Err(e) => eprintln!("could not read back {}: {e}", path.display()),
    }

    let _ = std::fs::remove_file(&path);
}
