use pcmconv_format::{catalogue, Format};
use structopt::StructOpt;

use crate::RunError;

#[derive(StructOpt)]
pub struct FormatsOpt {}

pub fn run(_: FormatsOpt) -> Result<(), RunError> {
    println!("{:>5}  {:<6}  {:>5}  {}", "index", "format", "bytes", "description");

    for format in catalogue() {
        println!("{:>5}  {:<6}  {:>5}  {} {}-bit {} endian",
            format.index(),
            format.to_string(),
            format.sample_size(),
            format.number(),
            format.bitwidth(),
            format.endian(),
        );
    }

    Ok(())
}
