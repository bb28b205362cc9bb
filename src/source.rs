//! Argument source — the process arguments as strings.

/// Process arguments with the first `trim` entries removed.
///
/// `read_args(1)` drops the program name. Arguments that are not valid
/// UTF-8 are converted lossily.
pub fn read_args(trim: usize) -> Vec<String> {
    let args = std::env::args_os()
        .map(|a| a.to_string_lossy().into_owned())
        .collect();
    trim_args(args, trim)
}

/// Drop the first `trim` arguments.
pub fn trim_args(args: Vec<String>, trim: usize) -> Vec<String> {
    args.into_iter().skip(trim).collect()
}
