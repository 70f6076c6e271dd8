use clap::Parser;
use clap_complete::Shell;

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    fwgather completions bash > ~/.bash_completion.d/fwgather\n\n\
                  Generate zsh completions:\n    fwgather completions zsh > ~/.zfunc/_fwgather\n\n\
                  Generate fish completions:\n    fwgather completions fish > ~/.config/fish/completions/fwgather.fish")]
pub struct CompletionsArgs {
    /// Target shell
    #[arg(value_enum, ignore_case = true)]
    pub shell: Shell,
}
