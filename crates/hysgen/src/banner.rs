//! Startup banner

pub const NAME: &str = "HysteriaGen";
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

const BANNER: &str = r"
   _   _           _            _       _____
  | | | |         | |          (_)     |  __ \
  | |_| |_   _ ___| |_ ___ _ __ _  __ _| |  \/ ___ _ __
  |  _  | | | / __| __/ _ \ '__| |/ _` | | __ / _ \ '_ \
  | | | | |_| \__ \ ||  __/ |  | | (_| | |_\ \  __/ | | |
  \_| |_/\__, |___/\__\___|_|  |_|\__,_|\____/\___|_| |_|
          __/ |
         |___/
";

pub fn print() {
    println!("{BANNER}");
    println!("{NAME} v{VERSION}");
}
