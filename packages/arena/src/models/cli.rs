use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(name = "opendere-arena", about = "play opendere from the terminal.")]
pub struct Opt {
    /// arenas to accept commands in (comma separated), overrides OPENDERE_ARENAS
    #[structopt(long)]
    pub arenas: Option<String>,
    /// seed for role selection and narration
    #[structopt(long)]
    pub seed: Option<u64>,
    /// interval between ticks in milliseconds, overrides OPENDERE_TICK_MS
    #[structopt(long)]
    pub tick_ms: Option<u64>,
}
