use crate::Error;

/// Dense row-major raster.
#[derive(Debug, Clone, PartialEq)]
pub struct Image<T> {
    width: usize,
    height: usize,
    data: Vec<T>,
}

impl<T> Image<T> {
    pub fn from_vec(width: usize, height: usize, data: Vec<T>) -> Result<Self, Error> {
        let expected = width.checked_mul(height).ok_or(Error::SizeMismatch {
            expected: usize::MAX,
            actual: data.len(),
        })?;

        if data.len() != expected {
            return Err(Error::SizeMismatch {
                expected,
                actual: data.len(),
            });
        }

        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn dims(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Linear offset of `(x, y)`. The caller guarantees the coordinate is in
    /// bounds; release builds do not check.
    #[inline]
    pub fn index_of(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.width && y < self.height, "pixel out of bounds");
        y * self.width + x
    }

    pub fn get(&self, x: usize, y: usize) -> Option<&T> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get(y * self.width + x)
    }

    pub fn get_mut(&mut self, x: usize, y: usize) -> Option<&mut T> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get_mut(y * self.width + x)
    }

    pub fn as_view(&self) -> ImageView<'_, T> {
        ImageView {
            width: self.width,
            height: self.height,
            stride: self.width,
            data: &self.data,
        }
    }

    /// Errors unless the raster is exactly `width x height`.
    pub fn check_dims(&self, width: usize, height: usize) -> Result<(), Error> {
        if (self.width, self.height) != (width, height) {
            return Err(Error::DimensionMismatch {
                expected: (self.width, self.height),
                actual: (width, height),
            });
        }
        Ok(())
    }
}

impl<T: Clone> Image<T> {
    pub fn new_fill(width: usize, height: usize, value: T) -> Self {
        let len = width.checked_mul(height).expect("image size overflow");
        Self {
            width,
            height,
            data: vec![value; len],
        }
    }

    pub fn fill(&mut self, value: T) {
        self.data.fill(value);
    }
}

/// Borrowed raster with an arbitrary row stride.
#[derive(Debug, Clone, Copy)]
pub struct ImageView<'a, T> {
    width: usize,
    height: usize,
    stride: usize,
    data: &'a [T],
}

impl<'a, T> ImageView<'a, T> {
    pub fn from_slice(
        width: usize,
        height: usize,
        stride: usize,
        data: &'a [T],
    ) -> Result<Self, Error> {
        if stride < width {
            return Err(Error::InvalidStride);
        }

        let min_len = min_required_len(width, height, stride).ok_or(Error::SizeMismatch {
            expected: usize::MAX,
            actual: data.len(),
        })?;

        if data.len() < min_len {
            return Err(Error::SizeMismatch {
                expected: min_len,
                actual: data.len(),
            });
        }

        Ok(Self {
            width,
            height,
            stride,
            data,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn row(&self, y: usize) -> &'a [T] {
        assert!(y < self.height, "row index out of bounds");
        let start = y * self.stride;
        &self.data[start..start + self.width]
    }

    pub fn get(&self, x: usize, y: usize) -> Option<&'a T> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get(y * self.stride + x)
    }
}

impl<T: Clone> ImageView<'_, T> {
    /// Copies the view into a contiguous raster.
    pub fn to_image(&self) -> Image<T> {
        let mut data = Vec::with_capacity(self.width * self.height);
        for y in 0..self.height {
            data.extend_from_slice(self.row(y));
        }

        Image {
            width: self.width,
            height: self.height,
            data,
        }
    }
}

fn min_required_len(width: usize, height: usize, stride: usize) -> Option<usize> {
    if width == 0 || height == 0 {
        return Some(0);
    }

    let rows_before_last = height.checked_sub(1)?;
    let base = rows_before_last.checked_mul(stride)?;
    base.checked_add(width)
}

#[cfg(test)]
mod tests {
    use super::{Image, ImageView};
    use crate::Error;

    #[test]
    fn from_vec_rejects_wrong_length() {
        let err = Image::from_vec(3, 2, vec![0u8; 5]).expect_err("length must match");
        assert_eq!(
            err,
            Error::SizeMismatch {
                expected: 6,
                actual: 5
            }
        );
    }

    #[test]
    fn indexing_and_fill() {
        let mut img = Image::new_fill(4, 3, 0u16);
        *img.get_mut(3, 2).expect("in bounds") = 7;

        assert_eq!(img.index_of(3, 2), 11);
        assert_eq!(img.get(3, 2), Some(&7));
        assert_eq!(img.get(4, 0), None);
        assert_eq!(img.get(0, 3), None);

        img.fill(1);
        assert!(img.data().iter().all(|&v| v == 1));
    }

    #[test]
    fn padded_view_copies_to_dense_image() {
        let data = vec![1u8, 2, 3, 99, 4, 5, 6, 88];
        let view = ImageView::from_slice(3, 2, 4, &data).expect("valid view");

        assert_eq!(view.row(1), &[4, 5, 6]);
        assert_eq!(view.get(2, 1), Some(&6));
        assert_eq!(view.get(3, 1), None);

        let dense = view.to_image();
        assert_eq!(dense.dims(), (3, 2));
        assert_eq!(dense.data(), &[1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn view_rejects_short_stride_and_short_buffer() {
        let data = vec![0u8; 7];
        assert_eq!(
            ImageView::from_slice(3, 2, 2, &data).err(),
            Some(Error::InvalidStride)
        );
        assert_eq!(
            ImageView::from_slice(3, 2, 5, &data).err(),
            Some(Error::SizeMismatch {
                expected: 8,
                actual: 7
            })
        );
    }

    #[test]
    fn check_dims_reports_both_sizes() {
        let img = Image::new_fill(5, 4, 0u8);
        assert!(img.check_dims(5, 4).is_ok());
        assert_eq!(
            img.check_dims(4, 5),
            Err(Error::DimensionMismatch {
                expected: (5, 4),
                actual: (4, 5)
            })
        );
    }
}
