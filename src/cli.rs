use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "cx")]
#[command(about = "Context-aware AI chat from the command line", long_about = None)]
pub struct Args {
    #[arg(short = 'n', long = "new", help = "Start a new conversation")]
    pub new_conversation: bool,

    #[arg(
        short = 'c',
        long = "continue",
        help = "Continue previous conversation even if expired"
    )]
    pub force_continue: bool,

    #[arg(long = "clear", help = "Clear all conversation history")]
    pub clear_history: bool,

    #[arg(
        long = "naive",
        help = "Stateless invocation: send only this prompt, keep no memory"
    )]
    pub naive: bool,

    #[arg(
        long = "no-stream",
        help = "Wait for the full response instead of streaming it"
    )]
    pub no_stream: bool,

    #[arg(
        long = "api-endpoint",
        help = "Custom API base URL (e.g., http://localhost:11434/v1)"
    )]
    pub api_endpoint: Option<String>,

    #[arg(help = "Prompt to send to the model")]
    pub prompt: Vec<String>,
}
