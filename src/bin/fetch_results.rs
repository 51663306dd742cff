use boxboxd::modules::openf1_api;

#[tokio::main]
async fn main() {
    let args: Vec<String> = std::env::args().collect();
    let meeting_key: i32 = args
        .get(1)
        .expect("usage: fetch_results <meeting_key>")
        .parse()
        .expect("meeting key must be an integer");

    println!("fetching results for meeting: {}", meeting_key);
    let results = openf1_api::get_race_results(meeting_key)
        .await
        .expect("failed to fetch race results");

    if results.is_empty() {
        println!("no results available for meeting {}", meeting_key);
        return;
    }

    for result in &results {
        println!(
            "{:>2}. {} ({}) {}",
            result.position, result.driver_name, result.driver_acronym, result.team_name
        );
    }
}
