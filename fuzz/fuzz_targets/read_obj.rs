#![no_main]
use libfuzzer_sys::fuzz_target;
use volume_coords::{estimate_normals, read_obj};

fuzz_target!(|data: &[u8]| {
    if let Ok(mesh) = read_obj(data) {
        let normals = estimate_normals(&mesh.vertices, &mesh.triangles);
        assert_eq!(normals.len(), mesh.vertices.len());
    }
});
