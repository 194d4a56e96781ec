use super::*;
use crate::common::sample_format::SampleFormat;

#[test]
fn new_zeroed_allocates_every_plane() {
    let desc = FrameDesc::new(33, 17, FrameFormat::yuv420(SampleFormat::U10).with_alpha());
    let frame = Frame::new_zeroed(desc).unwrap();

    assert_eq!(frame.plane_count(), 4);

    let dims: Vec<(u32, u32)> = frame
        .planes()
        .iter()
        .map(|p| (p.desc().width, p.desc().height))
        .collect();
    assert_eq!(dims, [(33, 17), (16, 8), (16, 8), (33, 17)]);

    for plane in frame.planes() {
        assert_eq!(plane.desc().stride % ALIGNMENT, 0);
        assert_eq!(plane.bytes().as_ptr() as usize % ALIGNMENT, 0);
        assert!(plane.bytes().iter().all(|&b| b == 0));
    }
}

#[test]
fn packed_layout_cannot_be_allocated() {
    let format = FrameFormat {
        layout: crate::common::frame_format::Layout::Packed,
        ..FrameFormat::yuv444(SampleFormat::U8)
    };
    let result = Frame::new_zeroed(FrameDesc::new(8, 8, format));
    assert!(matches!(result, Err(Error::UnsupportedFormat(_))));
}

#[test]
fn from_planes_accepts_custom_strides() {
    let format = FrameFormat::gray(SampleFormat::U16);
    let desc = FrameDesc::new(5, 3, format);
    let plane_desc = PlaneDesc {
        stride: 14,
        ..desc.plane_desc(0)
    };
    let samples: Vec<u16> = (0..15).collect();
    let plane = Plane::from_samples(plane_desc, &samples).unwrap();

    let frame = Frame::from_planes(desc, vec![plane]).unwrap();
    assert_eq!(frame.plane(0).row::<u16>(2), &[10, 11, 12, 13, 14]);
    assert_eq!(frame.plane(0).to_samples::<u16>(), samples);
}

#[test]
fn from_planes_rejects_wrong_count_and_geometry() {
    let desc = FrameDesc::new(8, 4, FrameFormat::yuv420(SampleFormat::U8));
    let luma = Plane::new_zeroed(desc.plane_desc(0)).unwrap();
    let chroma = Plane::new_zeroed(desc.plane_desc(1)).unwrap();

    let result = Frame::from_planes(desc, vec![luma.clone(), chroma.clone()]);
    assert!(matches!(result, Err(Error::InvalidPlane(_))));

    // full-size chroma does not match 4:2:0
    let result = Frame::from_planes(desc, vec![luma.clone(), luma.clone(), chroma]);
    assert!(matches!(result, Err(Error::InvalidPlane(_))));
}

#[test]
fn invalid_strides_are_rejected() {
    let too_small = PlaneDesc {
        stride: 3,
        ..PlaneDesc::new(4, 2, SampleFormat::U8)
    };
    assert!(matches!(
        Plane::new_zeroed(too_small),
        Err(Error::InvalidPlane(_))
    ));

    let misaligned = PlaneDesc {
        stride: 9,
        ..PlaneDesc::new(4, 2, SampleFormat::U16)
    };
    assert!(matches!(
        Plane::new_zeroed(misaligned),
        Err(Error::InvalidPlane(_))
    ));
}

#[test]
fn with_stride_keeps_rows_apart() {
    let desc = PlaneDesc::new(3, 2, SampleFormat::F32);
    let mut plane = Plane::with_stride(desc, 20).unwrap();
    plane.row_mut::<f32>(1).copy_from_slice(&[1.0, 2.0, 3.0]);

    assert_eq!(plane.desc().stride, 20);
    assert_eq!(plane.bytes().len(), 40);
    assert_eq!(plane.to_samples::<f32>(), [0.0, 0.0, 0.0, 1.0, 2.0, 3.0]);
    assert!(matches!(
        Plane::with_stride(desc, 10),
        Err(Error::InvalidPlane(_))
    ));
}

#[test]
fn from_samples_checks_count_and_type() {
    let desc = PlaneDesc::new(4, 2, SampleFormat::U8);
    assert!(matches!(
        Plane::from_samples(desc, &[0u8; 7]),
        Err(Error::InvalidPlane(_))
    ));
    assert!(matches!(
        Plane::from_samples(desc, &[0u16; 8]),
        Err(Error::InvalidPlane(_))
    ));
}

#[test]
fn copy_between_strides() {
    let packed = PlaneDesc {
        stride: 3,
        ..PlaneDesc::new(3, 3, SampleFormat::U8)
    };
    let src = Plane::from_samples(packed, &[1u8, 2, 3, 4, 5, 6, 7, 8, 9]).unwrap();
    let mut dst = Plane::new_zeroed(PlaneDesc::new(3, 3, SampleFormat::U8)).unwrap();

    dst.copy_from(&src);

    assert_eq!(dst.desc().stride, ALIGNMENT);
    assert_eq!(dst.to_samples::<u8>(), src.to_samples::<u8>());
    assert_eq!(dst.row_bytes(1), &[4, 5, 6]);
}

#[test]
#[should_panic(expected = "plane geometry mismatch")]
fn copy_between_different_sizes_panics() {
    let src = Plane::new_zeroed(PlaneDesc::new(3, 3, SampleFormat::U8)).unwrap();
    let mut dst = Plane::new_zeroed(PlaneDesc::new(4, 3, SampleFormat::U8)).unwrap();
    dst.copy_from(&src);
}

#[test]
fn display() {
    let desc = FrameDesc::new(4, 2, FrameFormat::gray(SampleFormat::F32));
    assert_eq!(desc.to_string(), "4x2 Gray planar f32");
    assert_eq!(
        desc.plane_desc(0).to_string(),
        format!("4x2 f32 (stride {})", ALIGNMENT)
    );
}
