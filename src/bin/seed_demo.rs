use boxboxd::modules::helpers::logging::setup_logging;
use boxboxd::modules::seed;
use boxboxd::modules::store::Store;

pub fn main() {
    setup_logging().expect("Failed to setup logging");

    let store = Store::from_env();
    seed::seed_if_empty(&store);

    println!("seed finished");
}
