//! Write a small mesh as a named BFAST container

use bfast::{Bfast, NamedBuffers};
use std::time::Instant;

fn main() -> bfast::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // A unit grid of quads, two triangles each
    let size = 256u32;
    let positions: Vec<f32> = (0..=size)
        .flat_map(|y| (0..=size).flat_map(move |x| [x as f32, y as f32, 0.0]))
        .collect();
    let indices: Vec<u32> = (0..size)
        .flat_map(|y| {
            (0..size).flat_map(move |x| {
                let i = y * (size + 1) + x;
                [i, i + 1, i + size + 1, i + 1, i + size + 2, i + size + 1]
            })
        })
        .collect();

    let mut container = NamedBuffers::new();
    container
        .push_pod("g3d:vertex:position:0:float32:3", &positions)?
        .push_pod("g3d:corner:index:0:int32:1", &indices)?
        .push("meta", b"{\"source\":\"grid demo\"}".as_slice())?;

    let start = Instant::now();
    let written = container.write_file("example_mesh.bfast")?;
    println!("Wrote {written} bytes in {:?}", start.elapsed());

    let bfast = Bfast::open("example_mesh.bfast")?;
    for (name, range) in bfast.names()?.iter().zip(bfast.ranges()) {
        println!("{name:>36} {:>10} bytes @ {}", range.len(), range.begin);
    }
    println!("\nRun 'cargo run --example inspect_container -- example_mesh.bfast' to inspect it!");
    Ok(())
}
