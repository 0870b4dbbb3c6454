pub use internal::*;

#[cfg(target_arch = "wasm32")]
mod internal {

    pub fn par_iter_reduce0<
        F: Fn(usize) -> X + Send + Sync,
        X: Send,
        C: Fn(X, X) -> X + Send + Sync,
        I: Fn() -> X + Send + Sync,
    >(
        n: usize,
        identity: I,
        combine: C,
        f: F,
    ) -> X {
        (0..n).map(f).fold(identity(), combine)
    }

    pub fn par_iter_mut1<T1: Send + Sync, F: Fn(usize, &mut T1) + Send + Sync>(arr1: &mut [T1], f: F) {
        arr1.iter_mut().enumerate().for_each(|(idx, v1)| {
            f(idx, v1);
        });
    }

    pub fn par_iter_mut2<T1: Send + Sync, T2: Send + Sync, F: Fn(usize, &mut T1, &mut T2) + Send + Sync>(
        arr1: &mut [T1],
        arr2: &mut [T2],
        f: F,
    ) {
        arr1.iter_mut()
            .zip(arr2.iter_mut())
            .enumerate()
            .for_each(|(idx, (v1, v2))| {
                f(idx, v1, v2);
            });
    }

    pub fn par_chunks_mut1<T1: Send + Sync, F: Fn(usize, &mut [T1]) + Send + Sync>(
        arr1: &mut [T1],
        chunk_size: usize,
        f: F,
    ) {
        arr1.chunks_mut(chunk_size).enumerate().for_each(|(idx, chunk)| {
            f(idx, chunk);
        });
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod internal {
    use rayon::prelude::*;

    /// Maps every index in `0..n` and folds the results with `combine`.
    /// `combine` has to be associative; rayon splits the range arbitrarily.
    pub fn par_iter_reduce0<
        F: Fn(usize) -> X + Send + Sync,
        X: Send,
        C: Fn(X, X) -> X + Send + Sync,
        I: Fn() -> X + Send + Sync,
    >(
        n: usize,
        identity: I,
        combine: C,
        f: F,
    ) -> X {
        (0..n).into_par_iter().map(f).reduce(identity, combine)
    }

    pub fn par_iter_mut1<T1: Send + Sync, F: Fn(usize, &mut T1) + Send + Sync>(arr1: &mut [T1], f: F) {
        arr1.into_par_iter().enumerate().for_each(|(idx, v1)| {
            f(idx, v1);
        });
    }

    pub fn par_iter_mut2<T1: Send + Sync, T2: Send + Sync, F: Fn(usize, &mut T1, &mut T2) + Send + Sync>(
        arr1: &mut [T1],
        arr2: &mut [T2],
        f: F,
    ) {
        arr1.into_par_iter()
            .zip(arr2.into_par_iter())
            .enumerate()
            .for_each(|(idx, (v1, v2))| {
                f(idx, v1, v2);
            });
    }

    /// One lane per chunk of `chunk_size` elements, `idx` is the chunk number.
    pub fn par_chunks_mut1<T1: Send + Sync, F: Fn(usize, &mut [T1]) + Send + Sync>(
        arr1: &mut [T1],
        chunk_size: usize,
        f: F,
    ) {
        arr1.par_chunks_mut(chunk_size).enumerate().for_each(|(idx, chunk)| {
            f(idx, chunk);
        });
    }
}
