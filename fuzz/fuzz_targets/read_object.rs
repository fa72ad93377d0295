#![no_main]
use libfuzzer_sys::fuzz_target;
use nalgebra::Vector3;
use volume_coords::NrrdObject;

fuzz_target!(|data: &[u8]| {
    if let Ok(obj) = NrrdObject::from_bytes(data) {
        let volume = obj.volume();
        let _ = volume.probe(&Vector3::new(0.5, 0.5, 0.5));
        let _ = volume.probe(&Vector3::new(-1., 1e9, 0.));
    }
});
