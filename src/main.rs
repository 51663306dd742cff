use rocket::{Build, Rocket};

use boxboxd::modules::helpers::logging::setup_logging;
use boxboxd::modules::seed;
use boxboxd::modules::store::Store;
use boxboxd::routes::{meeting, rating, user};

#[macro_use] extern crate rocket;

#[launch]
fn rocket() -> Rocket<Build> {
    setup_logging().expect("Failed to setup logging");

    let store = Store::from_env();
    seed::seed_if_empty(&store);

    rocket::build()
        .manage(store)
        .mount("/", routes![
            meeting::list,
            meeting::single,
            meeting::results,
            meeting::stats,
            meeting::years,
            rating::save,
            rating::get_one,
            rating::get_all,
            user::create,
            user::current,
            user::logout,
            user::stats,
        ])
}
