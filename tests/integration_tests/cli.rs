//! Argument handling: every usage error exits 2 before git is touched.

use crate::common::{MockRepo, mock_repo, rollforward_command, stderr, stdout};
use rstest::rstest;

#[rstest]
#[case::missing(&[])]
#[case::not_a_number(&["three"])]
#[case::negative(&["-3"])]
#[case::fractional(&["3.5"])]
#[case::too_large(&["4294967296"])]
#[case::extra_positional(&["3", "4"])]
#[case::unknown_format(&["--format", "yaml", "3"])]
fn usage_errors(mock_repo: MockRepo, #[case] args: &[&str]) {
    let output = mock_repo.run(args);

    assert_eq!(output.status.code(), Some(2), "{output:?}");
    assert_eq!(stdout(&output), "");
    assert!(stderr(&output).starts_with("error:"), "{}", stderr(&output));
    assert!(mock_repo.git_calls().is_empty());
}

#[test]
fn help_lists_options() {
    let output = rollforward_command().arg("--help").output().unwrap();

    assert!(output.status.success());
    let help = stdout(&output);
    for needle in [
        "<CHAPTER>",
        "--repo <PATH>",
        "--remote <REMOTE>",
        "--no-submodule-update",
        "--format <FORMAT>",
        "--verbose",
    ] {
        assert!(help.contains(needle), "missing {needle} in:\n{help}");
    }
}
