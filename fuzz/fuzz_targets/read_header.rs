#![no_main]
use libfuzzer_sys::fuzz_target;
use volume_coords::header::header_length;
use volume_coords::NrrdHeader;

fuzz_target!(|data: &[u8]| {
    let _ = header_length(data);
    if let Ok(header) = NrrdHeader::parse(&String::from_utf8_lossy(data)) {
        let _ = header.data_type();
        let _ = header.data_encoding();
        let _ = header.payload_endianness();
        let _ = header.payload_len();
        let _ = header.world_bounds();
        let _ = header.to_string().parse::<NrrdHeader>();
    }
});
