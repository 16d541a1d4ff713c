use gosp::{cmdline, environment};

fn main() -> Result<(), cmdline::Error> {
    pretty_env_logger::init();
    let env = environment::repl_env();
    let args = std::env::args().collect();
    cmdline::launch(args, &env)
}
