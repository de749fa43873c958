use approx::assert_relative_eq;
use rand::{rngs::StdRng, Rng, SeedableRng};

use rewarp_algebra::{builders, Point2f, Point3f, TransformMatrix};
use rewarp_image::{Image, ImageSize};
use rewarp_imgproc::parallel::ExecutionStrategy;
use rewarp_imgproc::warp::{
    MatrixShape, MatrixTransform, MatrixTransformParams, ResizeMode, WarpError,
};

type TestResult = Result<(), Box<dyn std::error::Error>>;

fn transform(m: TransformMatrix, mode: ResizeMode) -> MatrixTransform {
    MatrixTransform::new(
        MatrixTransformParams::default()
            .with_transformation(m)
            .with_resize_mode(mode),
    )
}

fn random_image(size: ImageSize, seed: u64) -> Result<Image<f32, 1>, Box<dyn std::error::Error>> {
    let mut rng = StdRng::seed_from_u64(seed);
    let data = (0..size.area()).map(|_| rng.random_range(0.0f32..255.0)).collect();
    Ok(Image::new(size, data)?)
}

// one matrix of each shape, all far from singular on a 64x48 source
fn sample_matrices() -> Result<Vec<TransformMatrix>, Box<dyn std::error::Error>> {
    let center = Point2f::new(32.0, 24.0);
    let rotation = builders::rotation_matrix_2d(center, 0.4);
    let rotation3d = builders::rotation_matrix_3d(
        Point3f::new(32.0, 24.0, 0.0),
        Point3f::new(0.2, 1.0, 0.1),
        0.3,
    )?;
    let camera = builders::projection_matrix(500.0)?
        .matmul(&builders::translation_matrix_3d(Point3f::new(0.0, 0.0, 20.0)))?
        .matmul(&rotation3d)?;

    Ok(vec![
        TransformMatrix::from_rows([[1.2, 0.3], [-0.2, 0.9]]),
        TransformMatrix::new(2, 3, rotation.as_slice()[..6].to_vec())?,
        rotation.matmul(&builders::scaling_matrix_2d(Point2f::new(1.5, 0.8)))?,
        TransformMatrix::from_rows([
            [1.0, 0.1, 0.3, 2.0],
            [0.0, 0.9, -0.2, 1.0],
            [0.001, 0.001, 0.5, 1.0],
        ]),
        TransformMatrix::from_rows([
            [0.9, 0.1, 1.0],
            [-0.1, 1.0, 2.0],
            [0.2, 0.1, 0.5],
            [0.001, 0.002, 1.0],
        ]),
        camera,
    ])
}

#[test]
fn identity_keeps_every_sample() -> TestResult {
    let src = Image::<u8, 3>::new([5, 4].into(), (0..60).map(|v| v as u8 * 4).collect())?;
    for m in [TransformMatrix::identity(2), TransformMatrix::identity(3)] {
        let dst = transform(m, ResizeMode::KeepDimensions).apply(&src)?;
        assert_eq!(dst, src);
    }
    Ok(())
}

#[test]
fn round_trip_every_shape() -> TestResult {
    let mut rng = StdRng::seed_from_u64(7);
    for m in sample_matrices()? {
        let mut t = transform(m, ResizeMode::AdjustDimensions);
        t.bind([64, 48].into())?;
        for _ in 0..200 {
            let p = Point2f::new(rng.random_range(0.0..64.0), rng.random_range(0.0..48.0));
            let q = t.backward(t.forward(p)?)?;
            assert_relative_eq!(q.x, p.x, epsilon = 1e-2);
            assert_relative_eq!(q.y, p.y, epsilon = 1e-2);
        }
    }
    Ok(())
}

#[test]
fn adjusted_extent_holds_all_corners() -> TestResult {
    let size = ImageSize {
        width: 64,
        height: 48,
    };
    let corners = [
        Point2f::new(0.0, 0.0),
        Point2f::new(63.0, 0.0),
        Point2f::new(0.0, 47.0),
        Point2f::new(63.0, 47.0),
    ];
    for m in sample_matrices()? {
        let mut t = transform(m, ResizeMode::AdjustDimensions);
        let extent = t.bind(size)?;
        for q in t.forward_array(corners)? {
            assert!(q.x >= -1e-3 && q.y >= -1e-3);
            assert!(q.x <= extent.size.width as f32 - 0.5);
            assert!(q.y <= extent.size.height as f32 - 0.5);
        }
    }
    Ok(())
}

#[test]
fn singular_matrix_is_reported() -> TestResult {
    let mut t = transform(
        TransformMatrix::from_rows([[1.0, 2.0], [0.0, 0.0]]),
        ResizeMode::AdjustDimensions,
    );
    let src = Image::<f32, 1>::from_size_val([2, 2].into(), 1.0)?;
    assert_eq!(t.apply(&src), Err(WarpError::SingularMatrix(0.0)));
    assert_eq!(t.bind(src.size()), Err(WarpError::SingularMatrix(0.0)));
    assert_eq!(
        t.backward(Point2f::new(0.0, 0.0)),
        Err(WarpError::SingularMatrix(0.0))
    );
    Ok(())
}

#[test]
fn every_shape_flips_a_small_grid() -> TestResult {
    let src = Image::<f32, 1>::new([2, 2].into(), vec![1.0, 2.0, 3.0, 4.0])?;
    let flips = [
        (
            TransformMatrix::from_rows([[-1.0, 0.0], [0.0, 1.0]]),
            MatrixShape::M2x2,
        ),
        (
            TransformMatrix::from_rows([[-1.0, 0.0, 1.0], [0.0, 1.0, 0.0]]),
            MatrixShape::M2x3,
        ),
        (
            TransformMatrix::from_rows([[-1.0, 0.0, 1.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]),
            MatrixShape::M3x3,
        ),
        (
            TransformMatrix::from_rows([
                [-1.0, 0.0, 9.0, 1.0],
                [0.0, 1.0, 9.0, 0.0],
                [0.0, 0.0, 9.0, 1.0],
            ]),
            MatrixShape::M3x4,
        ),
        (
            TransformMatrix::from_rows([
                [-1.0, 0.0, 1.0],
                [0.0, 1.0, 0.0],
                [0.0, 0.0, 0.0],
                [0.0, 0.0, 1.0],
            ]),
            MatrixShape::M4x3,
        ),
        (
            TransformMatrix::from_rows([
                [-1.0, 0.0, 0.0, 1.0],
                [0.0, 1.0, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ]),
            MatrixShape::M4x4,
        ),
    ];

    for (m, shape) in flips {
        let t = transform(m, ResizeMode::AdjustDimensions);
        assert_eq!(t.analyzed()?.shape(), shape);
        let dst = t.apply(&src)?;
        assert_eq!(dst.size(), src.size(), "{shape:?}");
        assert_eq!(dst.as_slice(), &[2.0, 1.0, 4.0, 3.0], "{shape:?}");
    }
    Ok(())
}

#[test]
fn quarter_turn_keeps_dimensions() -> TestResult {
    let src = Image::<f32, 1>::new([2, 2].into(), vec![1.0, 2.0, 3.0, 4.0])?;
    let t = transform(
        TransformMatrix::from_rows([[0.0, -1.0], [1.0, 0.0]]),
        ResizeMode::KeepDimensions,
    );
    let dst = t.apply(&src)?;
    assert_eq!(dst.size(), src.size());
    // (x, y) goes to (-y, x): only x == 0 samples inside the source
    assert_eq!(dst.as_slice(), &[1.0, 0.0, 2.0, 0.0]);
    Ok(())
}

#[test]
fn translation_moves_the_offset() -> TestResult {
    let src = random_image([10, 10].into(), 3)?;
    let t = transform(
        TransformMatrix::from_rows([[1.0, 0.0, 5.0], [0.0, 1.0, 3.0]]),
        ResizeMode::AdjustDimensions,
    );
    let (dst, offset) = t.apply_with_offset(&src)?;
    assert_eq!(
        dst.size(),
        ImageSize {
            width: 10,
            height: 10
        }
    );
    assert_eq!(offset, Point2f::new(5.0, 3.0));
    assert_eq!(dst, src);
    Ok(())
}

#[test]
fn projective_divide_by_zero_is_local() -> TestResult {
    // the inverse is [[1, 0, 0], [0, 1, 0], [1, 3, -4]]: weight x + 3y - 4 vanishes at (1, 1)
    let m = TransformMatrix::from_rows([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.25, 0.75, -0.25]]);
    let t = transform(m, ResizeMode::KeepDimensions);

    let src = Image::<f32, 1>::new([3, 3].into(), (0..9).map(|v| 1.0 + v as f32).collect())?;
    let dst = t.apply(&src)?;

    assert_eq!(*dst.get_pixel(1, 1, 0)?, 0.0);
    assert_eq!(*dst.get_pixel(0, 0, 0)?, 1.0);
    assert_eq!(*dst.get_pixel(2, 1, 0)?, 6.0);
    assert_eq!(*dst.get_pixel(0, 2, 0)?, 4.0);
    assert_eq!(*dst.get_pixel(2, 2, 0)?, 3.0);
    assert_relative_eq!(*dst.get_pixel(1, 2, 0)?, 10.0 / 3.0, epsilon = 1e-5);
    assert_relative_eq!(*dst.get_pixel(1, 0, 0)?, 2.0 / 3.0, epsilon = 1e-5);

    // every other pixel goes through the interpolator
    let mark = |_: &Image<f32, 1>, _: f32, _: f32| [9.0f32];
    let (marked, _) = t.apply_with_interpolator(&src, &mark)?;
    let expected = [9.0, 9.0, 9.0, 9.0, 0.0, 9.0, 9.0, 9.0, 9.0];
    assert_eq!(marked.as_slice(), &expected);
    Ok(())
}

#[test]
fn execution_strategies_agree() -> TestResult {
    let src = random_image([96, 80].into(), 11)?;
    let m = builders::rotation_matrix_2d(Point2f::new(48.0, 40.0), 0.7)
        .matmul(&builders::scaling_matrix_uniform(1.3))?;

    let run = |execution| {
        MatrixTransform::new(
            MatrixTransformParams::default()
                .with_transformation(m.clone())
                .with_resize_mode(ResizeMode::AdjustDimensions)
                .with_execution(execution),
        )
        .apply_with_offset(&src)
    };

    let serial = run(ExecutionStrategy::Serial)?;
    assert_eq!(run(ExecutionStrategy::ParallelRows)?, serial);
    assert_eq!(run(ExecutionStrategy::Fixed(4))?, serial);
    assert_eq!(
        run(ExecutionStrategy::Fixed(0)),
        Err(WarpError::Parallel(
            rewarp_imgproc::parallel::ParallelError::InvalidThreadCount(0)
        ))
    );
    Ok(())
}

#[test]
fn perspective_camera_depth() -> TestResult {
    let matrices = sample_matrices()?;
    let camera = matrices.last().ok_or("no camera")?;
    let mut t = transform(camera.clone(), ResizeMode::AdjustDimensions);
    t.bind([64, 48].into())?;

    let src = random_image([64, 48].into(), 5)?;
    let (dst, depth, offset) = t.apply_with_depth(&src)?;
    assert_eq!(depth.size(), dst.size());
    assert_eq!(Some(offset), t.bound_extent().map(|e| e.offset));

    // the depth grid agrees with the point interface
    for (x, y) in [(3usize, 4usize), (10, 20)] {
        let p = t.backward_with_depth(Point2f::new(x as f32, y as f32))?;
        assert_relative_eq!(*depth.get_pixel(x, y, 0)?, p.z, epsilon = 1e-2);
    }
    Ok(())
}
