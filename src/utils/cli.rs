//! Command-line argument parsing and help for codews.
//!
//! This module handles the few flags used for config initialization and help.
//!
//! When invoked with no args/flags (cws), codews simply launches the TUI at `$HOME/codeWS`.

use crate::config::Config;

#[derive(Debug, PartialEq, Eq)]
pub enum CliAction {
    RunApp,
    Exit,
}

pub fn handle_args() -> CliAction {
    let args: Vec<String> = std::env::args().skip(1).collect();
    parse_args(&args)
}

fn parse_args(args: &[String]) -> CliAction {
    let Some(first) = args.first() else {
        return CliAction::RunApp;
    };

    if args.len() > 1 {
        eprintln!("Error: codews accepts only one option at a time.");
        eprintln!("Usage: cws [OPTION]");
        return CliAction::Exit;
    }

    match first.as_str() {
        "--version" | "-v" => {
            print_version();
            CliAction::Exit
        }
        "-h" | "--help" => {
            print_help();
            CliAction::Exit
        }
        "--config-help" => {
            print_config_help();
            CliAction::Exit
        }
        "--keybinds" | "--keys" => {
            print_keybinds();
            CliAction::Exit
        }
        "--init" => {
            if let Err(e) = Config::generate_default(&Config::default_path()) {
                eprintln!("Error: {}", e);
            }
            CliAction::Exit
        }
        arg => {
            eprintln!("Unknown argument: {}", arg);
            eprintln!("Try --help for available options");
            CliAction::Exit
        }
    }
}

fn print_version() {
    println!("codews {}", env!("CARGO_PKG_VERSION"));
}

fn print_help() {
    println!(
        r#"codews - browse $HOME/codeWS and build/run C, Python3 and assembly programs

USAGE:
  cws [OPTION]

OPTIONS:
      --init              Generate the default configuration
      --config-help       Display all the configuration options
      --keybinds          Display all the default keybinds
  -h, --help              Print help information
  -v, --version           Display the current installed version of codews

ENVIRONMENT:
  HOME                    Required, the workspace root is $HOME/codeWS
  CODEWS_CONFIG           Override the default config path
  CODEWS_LOG              Log filter (e.g. "codews=debug")
"#
    );
}

const KEYBINDS_TEXT: &str = r##"
=========================
 Key Bindings
=========================
[keys]
  select_next               ["j", "Down"]
  select_prev               ["k", "Up"]
  enter                     ["Enter", "l", "Right"]   (open files, enter directories)
  go_up                     ["Backspace", "h", "Left"]
  compile_run               ["Ctrl+r"]
  make_executable           ["Ctrl+e"]
  make_not_executable       ["Ctrl+x"]
  execute                   ["x"]
  new_file                  ["Ctrl+f"]
  new_directory             ["Ctrl+n"]
  delete                    ["Ctrl+d"]
  quit                      ["q", "Esc"]

  Syntax Reference:
    Modifiers: ctrl, alt (or meta), shift, joined to the key with "+" or "-"
    Standard:  ctrl+x, ctrl-x, alt+x, shift+x
    Vim style: <c-x> (Ctrl), <m-x>/<a-x> (Alt/Meta), <s-x> (Shift)
    Special:   "space", "Backspace", "Enter", "Esc", "Tab", "Delete", "Home", "End",
               "PageUp", "PageDown", "Up", "Down", "Left", "Right", "F1".."F24"
    A lone "-" or "+" binds that character ("ctrl+-" binds Ctrl and minus).

  Dialogs:
    y/Enter confirms, n/Esc declines. Text input is submitted with Enter.
"##;

fn print_keybinds() {
    println!("{}", KEYBINDS_TEXT);
}

fn print_config_help() {
    let help_text = r##"
codews - Configuration Guide (codews.toml)

=========================
 General Settings
=========================
[general]
  watch                      Re-list the current directory on file changes [default: true]
  auto_open_readme           Open README.md when entering its directory [default: true]
  scrollback                 Runner output lines kept (default: 1000, min: 100, max: 100000)
  foreground_runs            Run programs in the terminal so they can read input [default: false]

=========================
 Viewers
=========================
[viewers]
  image                      Viewer for jpg/png files [default: "feh"]
  document                   Viewer for pdf files [default: "zathura"]
  editor                     Text editor for everything else, runs in the foreground [default: "nvim"]

=========================
 Theme Configuration
=========================
[theme]
  selection_icon             Symbol in front of the selected entry

Each sub-table supports fg/bg colors ("Red", "Blue", hex "#RRGGBB", or "default"):

[theme.entry]                Plain files
[theme.directory]            Directory entries (bold)
[theme.executable]           Executable files
[theme.selection]            Selection bar
[theme.accent]               Borders and pane titles
[theme.path]                 Path header
[theme.status_line]          Footer showing the latest log message
[theme.widget]               Confirm and input dialogs
"##;

    println!("{}{}", help_text, KEYBINDS_TEXT);
}
