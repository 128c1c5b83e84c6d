// Leave-one-out evaluation of the k-nearest neighbour classifier on the Iris dataset.
//
// With ```--data``` the rows are read from a csv file (four measurements followed by the species).
// Without it, a synthetic dataset of three Iris-shaped clusters is generated. Every selected
// metric is evaluated and its error rate and coverage are reported.
use std::{convert::TryFrom, process::exit};

use clap::{value_t, App, Arg, ArgMatches};
use ndarray::Array1;
use simknn::{
    dataset,
    iris::{self, IrisClass},
    Category, ClassifierBuilder, Metric, Scalar,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum LogLevel {
    Quiet,
    Normal,
    Verbose,
}

fn log(level: LogLevel, required: LogLevel, msg: &str) {
    if level != LogLevel::Quiet && (level == required || required == LogLevel::Normal) {
        println!("{}", msg);
    }
}

// Per-species cluster centres: sepal length, sepal width, petal length, petal width (cm).
const CENTRES: [(IrisClass, [Scalar; 4]); 3] = [
    (IrisClass::Setosa, [5.0, 3.4, 1.5, 0.25]),
    (IrisClass::Versicolor, [5.9, 2.8, 4.3, 1.3]),
    (IrisClass::Virginica, [6.6, 3.0, 5.6, 2.0]),
];

fn synthetic(seed: u64, per_class: usize) -> String {
    let mut rng = oorandom::Rand64::new(seed as u128);
    let mut csv = String::new();

    for (class, centre) in CENTRES.iter() {
        for _ in 0..per_class {
            for c in centre.iter() {
                let x = c + (rng.rand_float() - 0.5) * 0.8;
                csv.push_str(&format!("{:.2},", x.max(0.1)));
            }
            csv.push_str(class.name());
            csv.push('\n');
        }
    }

    csv
}

fn app() -> App<'static, 'static> {
    App::new("iris")
        .about("Leave-one-out evaluation of k-nearest neighbour classification")
        .arg(
            Arg::with_name("data")
                .long("data")
                .takes_value(true)
                .value_name("FILE")
                .help("Csv file with four measurements and a species per row"),
        )
        .arg(
            Arg::with_name("k")
                .short("k")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("5")
                .help("Number of neighbours, negative values are treated as zero"),
        )
        .arg(
            Arg::with_name("metric")
                .long("metric")
                .takes_value(true)
                .default_value("all")
                .help("manhattan, euclidean, chebyshev or all"),
        )
        .arg(
            Arg::with_name("query")
                .long("query")
                .takes_value(true)
                .value_name("X,X,X,X")
                .help("Raw measurements (cm) to classify"),
        )
        .arg(
            Arg::with_name("seed")
                .long("seed")
                .takes_value(true)
                .default_value("0")
                .help("Seed of the synthetic dataset"),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .long("verbose")
                .conflicts_with("quiet"),
        )
        .arg(Arg::with_name("quiet").short("q").long("quiet"))
}

fn run(matches: &ArgMatches<'_>) -> simknn::Result<()> {
    let level = if matches.is_present("quiet") {
        LogLevel::Quiet
    } else if matches.is_present("verbose") {
        LogLevel::Verbose
    } else {
        LogLevel::Normal
    };

    let k = value_t!(matches, "k", i64).unwrap_or_else(|e| e.exit());
    let k = usize::try_from(k).unwrap_or(0);

    let metrics = match matches.value_of("metric") {
        Some("all") | None => Metric::ALL.to_vec(),
        Some(name) => vec![name.parse::<Metric>()?],
    };

    let (samples, normalizer) = match matches.value_of("data") {
        Some(path) => {
            log(level, LogLevel::Verbose, &format!("Open file: {}", path));
            dataset::load_csv(path, &iris::factory())?
        }
        None => {
            let seed = value_t!(matches, "seed", u64).unwrap_or_else(|e| e.exit());
            log(
                level,
                LogLevel::Verbose,
                &format!("Generate synthetic dataset, seed = {}", seed),
            );
            dataset::load(synthetic(seed, 50).as_bytes(), &iris::factory())?
        }
    };

    log(
        level,
        LogLevel::Verbose,
        &format!("> Samples: {}, k = {}", samples.len(), k),
    );

    let query = match matches.value_of("query") {
        Some(raw) => {
            let values = raw
                .split(',')
                .map(|v| {
                    v.trim().parse::<Scalar>().map_err(|_| simknn::Error::Parse {
                        line: 1,
                        value: v.to_string(),
                    })
                })
                .collect::<simknn::Result<Vec<_>>>()?;
            let mut query = Array1::from(values);
            normalizer.apply(&mut query)?;
            log(
                level,
                LogLevel::Verbose,
                &format!("> Normalized query: {}", query),
            );
            Some(query)
        }
        None => None,
    };

    for metric in metrics {
        let classifier = ClassifierBuilder::new()
            .k(k)
            .metric(metric)
            .build(samples.clone())?;

        let eval = classifier.evaluate()?;
        log(level, LogLevel::Normal, &format!("[{}]", metric));
        log(level, LogLevel::Normal, &eval.to_string());
        log(
            level,
            LogLevel::Verbose,
            &format!(
                "> errors = {}, misses = {}, correct = {}/{}",
                eval.errors(),
                eval.misses(),
                eval.correct(),
                eval.total()
            ),
        );

        if let Some(query) = &query {
            let decision = match classifier.classify_features(query.view())? {
                Some(class) => class.to_string(),
                None => "no decision".to_string(),
            };
            log(level, LogLevel::Normal, &format!("Query: {}", decision));
        }
    }

    Ok(())
}

fn main() {
    let matches = app().get_matches();

    if let Err(e) = run(&matches) {
        eprintln!("Error: {}", e);
        exit(1);
    }
}
