use crate::cli::commands::InitArgs;
use crate::io::config_io;

pub fn cmd_init(args: InitArgs) -> Result<(), Box<dyn std::error::Error>> {
    let cwd = std::env::current_dir()?;
    let (config_path, store_path) = config_io::write_initial_files(&cwd, args.force)?;
    println!("wrote {}", config_path.display());
    println!("tasks will be stored in {}", store_path.display());
    Ok(())
}
