/// Timestamped status line on stdout.
/// Pass a start time as the first argument to also report elapsed seconds.
/// ```ignore
/// echo!("fetching page {}", 3);
/// let start = chrono::Local::now();
/// echo!(start, "crawl finished, {} images", 120);
/// ```
#[macro_export]
macro_rules! echo {
    ($strfm:literal $(, $arg:expr)* $(,)?) => {{
        let now = ::chrono::Local::now();
        println!("{} : {}", now.format("%Y-%m-%d %H:%M:%S"), format!($strfm $(, $arg)*));
    }};
    ($start:expr, $strfm:literal $(, $arg:expr)* $(,)?) => {{
        let now = ::chrono::Local::now();
        let secs = (now - $start).num_milliseconds() as f64 / 1000.0;
        println!(
            "{} : {} ({secs:.2} sec)",
            now.format("%Y-%m-%d %H:%M:%S"),
            format!($strfm $(, $arg)*)
        );
    }};
}
