use clap::Parser;

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    chart-ci completions bash > ~/.bash_completion.d/chart-ci\n\n\
                  Generate zsh completions:\n    chart-ci completions zsh > ~/.zfunc/_chart-ci\n\n\
                  Generate fish completions:\n    chart-ci completions fish > ~/.config/fish/completions/chart-ci.fish")]
pub struct CompletionsArgs {
    /// Shell type (bash, elvish, fish, powershell, zsh)
    pub shell: String,
}
