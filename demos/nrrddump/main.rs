//! An application for reading NRRD coordinate volume meta-data.

extern crate env_logger;
extern crate volume_coords;

use std::env;
use volume_coords::NrrdObject;

fn main() {
    env_logger::init();
    let mut args = env::args().skip(1);
    let filename = args.next().expect("Path to NRRD file is required");
    let obj = NrrdObject::from_file(filename).expect("Failed to read NRRD file");
    let header = obj.header();
    println!("{:#?}", header);
    let bounds = header.world_bounds();
    println!("World bounds: {:?} to {:?}", bounds.min, bounds.max);
}
