use std::process::Command;

use assert_cmd::prelude::*;
use difference::Changeset;

fn run(args: &[&str]) -> String {
    let output = Command::cargo_bin("weighted-sokoban")
        .unwrap()
        .args(args)
        .output()
        .unwrap();
    assert!(output.status.success(), "{:?} failed", args);
    assert_eq!(String::from_utf8_lossy(&output.stderr), "");
    String::from_utf8(output.stdout).unwrap()
}

fn assert_output(args: &[&str], expected: &str) {
    let out = run(args);
    if out != expected {
        println!("{}", Changeset::new(expected, &out, "\n"));
        panic!("unexpected output of {:?}", args);
    }
}

#[test]
fn run_corridor() {
    let output = r"Solving levels/custom/01-corridor.txt...
Found solution:
######
#@ $.#
######

######
# @$.#
######

######
#  @*#
######

rR
Moves: 2
Pushes: 1
Cost: 5
";
    assert_output(&["levels/custom/01-corridor.txt"], output);
}

#[test]
fn run_warehouse_format() {
    let output = r"Solving levels/custom/01-corridor.txt...
Found solution:
######
#@ $.#
######

######
# @$.#
######

######
#  @*#
######

rR
Moves: 2
Pushes: 1
Cost: 5
";
    // no worker on a target so both formats look the same here
    assert_output(
        &["--warehouse", "--heuristic", "sum-of-minima", "levels/custom/01-corridor.txt"],
        output,
    );
}

#[test]
fn run_no_solution() {
    assert_output(
        &["levels/custom/no-solution-corner.txt"],
        "Solving levels/custom/no-solution-corner.txt...\nNo solution\n",
    );
    assert_output(
        &["--max-nodes", "1", "levels/custom/02-two-weights.txt"],
        "Solving levels/custom/02-two-weights.txt...\nNo solution within 1 expanded states\n",
    );
}

#[test]
fn run_stats() {
    let out = run(&["--stats", "levels/custom/02-two-weights.txt"]);
    assert!(out.contains("States created total: "));
    assert!(out.contains("Depth"));
    assert!(out.ends_with("Cost: 13\n"));
}

#[test]
fn run_taboo() {
    // every row is as wide as the widest one
    let output = concat!(
        "####  \n",
        "#X #  \n",
        "#  ###\n",
        "#   X#\n",
        "#   X#\n",
        "#XX###\n",
        "####  \n",
    );
    assert_output(&["--taboo", "levels/warehouses/warehouse_01.txt"], output);
}

#[test]
fn run_replay() {
    let output = concat!(
        "####  \n",
        "# .#  \n",
        "#  ###\n",
        "#*   #\n",
        "#  $@#\n",
        "#  ###\n",
        "####  \n",
    );
    assert_output(
        &["--replay", "Right,Right,Down", "levels/warehouses/warehouse_01.txt"],
        output,
    );
    assert_output(
        &["--replay", "rrd", "levels/warehouses/warehouse_01.txt"],
        output,
    );
    assert_output(
        &["--replay", "Right,Right,Right", "levels/warehouses/warehouse_01.txt"],
        "Impossible\n",
    );
}

#[test]
fn run_walk() {
    assert_output(
        &["--walk", "1,2", "levels/custom/01-corridor.txt"],
        "r\nMoves: 1\n",
    );
}

#[test]
fn run_bad_formatting_args() {
    // doesn't check stderr, only that it fails and doesn't print to stdout
    Command::cargo_bin("weighted-sokoban")
        .unwrap()
        .arg("--xsb")
        .arg("--warehouse")
        .arg("levels/custom/01-corridor.txt")
        .assert()
        .failure()
        .stdout("");
}

#[test]
fn run_missing_file() {
    Command::cargo_bin("weighted-sokoban")
        .unwrap()
        .arg("levels/does-not-exist.txt")
        .assert()
        .failure()
        .stdout("");
}
