use env_logger::{Env, Target};
use strata_split::{SplitOptions, load_and_split};

const SOURCE: &str = "wine_quality_preprocessed.csv";
const TARGET: &str = "quality";

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Stdout)
        .format_timestamp(None)
        .init();

    match load_and_split(SOURCE, TARGET, &SplitOptions::default()) {
        Ok((x_train, _, _, _)) => {
            println!("\nSample of 5 training feature rows:");
            println!("{}", x_train.head(5));
        }
        Err(err) => println!("Error: {err}"),
    }
}
