//! Provides the implementation for (sort) k-means over deduplicated sRGB colors

use palette::Srgb;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use std::collections::HashMap;

/// An RGB color with components in `0.0..=255.0`
pub type Point = [f32; 3];

/// Squared euclidean distance between two colors
fn squared_distance(x: Point, y: Point) -> f32 {
	let dr = x[0] - y[0];
	let dg = x[1] - y[1];
	let db = x[2] - y[2];
	dr * dr + dg * dg + db * db
}

/// Deduplicated colors from a sample set
#[derive(Debug, Clone)]
pub struct ColorCounts {
	/// Unique colors, in order of first appearance
	pub(crate) colors: Vec<Point>,
	/// The number of samples for each color
	pub(crate) counts: Vec<u32>,
}

impl ColorCounts {
	/// Merge duplicate samples, counting how many samples each unique color had
	#[must_use]
	pub fn from_samples(samples: &[Srgb<u8>]) -> Self {
		let mut colors = Vec::new();
		let mut counts = Vec::<u32>::new();

		// Packed Srgb -> data index
		let mut memo: HashMap<u32, usize> = HashMap::new();

		for srgb in samples {
			let key = srgb.into_u32::<palette::rgb::channels::Rgba>();
			let index = *memo.entry(key).or_insert_with(|| {
				colors.push([f32::from(srgb.red), f32::from(srgb.green), f32::from(srgb.blue)]);
				counts.push(0);
				colors.len() - 1
			});

			counts[index] = counts[index].saturating_add(1);
		}

		Self { colors, counts }
	}

	/// The number of unique colors
	#[must_use]
	pub fn num_colors(&self) -> u32 {
		// there are at most 2^24 unique 8-bit sRGB colors
		#[allow(clippy::cast_possible_truncation)]
		{
			self.colors.len() as u32
		}
	}

	/// Total number of samples across all colors
	#[must_use]
	pub fn total_count(&self) -> u64 {
		self.counts.iter().copied().map(u64::from).sum()
	}

	/// Iterate over each unique color and its count
	pub fn pairs(&self) -> impl Iterator<Item = (Point, u32)> + '_ {
		self.colors.iter().copied().zip(self.counts.iter().copied())
	}
}

/// Parameters for a k-means run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KmeansOptions {
	/// The number of independent runs; the one with the lowest variance is kept
	pub trials: u32,
	/// The (maximum) number of centroids to find
	pub k: u8,
	/// Stop once the centroids moved at most this much in total during an iteration
	pub convergence_threshold: f32,
	/// Upper bound on iterations for each trial
	pub max_iter: u32,
	/// Seed for choosing the initial centroids
	pub seed: u64,
}

impl Default for KmeansOptions {
	fn default() -> Self {
		Self {
			trials: 1,
			k: 5,
			convergence_threshold: 0.05,
			max_iter: 128,
			seed: 0,
		}
	}
}

/// Bookkeeping for each k-means data point
struct PointData {
	/// Center assignment for this data point
	assignment: Vec<u8>,
	/// Weight of each data point used to randomly select starting centroids in k-means++
	weight: Vec<f32>,
}

impl PointData {
	/// Create a [`PointData`] with the given number data points
	fn new(n: u32) -> Self {
		let n = n as usize;
		Self {
			assignment: vec![0; n],
			weight: vec![f32::INFINITY; n],
		}
	}

	/// Reset data for the next k-means trial
	fn reset(&mut self) {
		self.assignment.fill(0);
		self.weight.fill(f32::INFINITY);
	}
}

/// Data for each center/centroid
struct CenterData {
	/// The centroid point
	centroid: Vec<Point>,
	/// Vector sum for all data points in this center
	sum: Vec<[f64; 3]>,
	/// Number of points in this center
	count: Vec<u32>,
}

impl CenterData {
	/// Create a [`CenterData`] with the given number of centers
	fn new(k: u8) -> Self {
		let k = usize::from(k);
		Self {
			centroid: Vec::with_capacity(k),
			sum: vec![[0.0; 3]; k],
			count: vec![0; k],
		}
	}

	/// Reset data for the next k-means trial
	fn reset(&mut self) {
		self.centroid.clear();
		self.sum.fill([0.0; 3]);
		self.count.fill(0);
	}

	/// Move `n` samples of `color` from center `from` to center `to`
	fn transfer(&mut self, color: Point, n: u32, from: usize, to: usize) {
		let nf = f64::from(n);
		for c in 0..3 {
			let v = nf * f64::from(color[c]);
			self.sum[from][c] -= v;
			self.sum[to][c] += v;
		}
		self.count[from] -= n;
		self.count[to] += n;
	}
}

/// Holds all the state used by k-means
struct KmeansState {
	/// Data for each center
	centers: CenterData,
	/// One fourth of the squared distance between each pairs of centers
	distances: Vec<(u8, f32)>,
	/// Data for each point
	points: PointData,
}

impl KmeansState {
	/// Initialize a new [`KmeansState`] with `k` centers and `n` data points
	fn new(k: u8, n: u32) -> Self {
		Self {
			centers: CenterData::new(k),
			distances: vec![(0, 0.0); usize::from(k) * usize::from(k)],
			points: PointData::new(n),
		}
	}
}

/// Result from running k-means
#[derive(Debug, Clone)]
pub struct KmeansResult {
	/// Variance achieved by these centroids
	///
	/// A lower variance indicates a higher accuracy.
	pub variance: f64,
	/// Final centroid colors, in no particular order
	pub centroids: Vec<Point>,
	/// Number of samples in each centroid
	pub counts: Vec<u32>,
	/// Number of elapsed iterations
	pub iterations: u32,
}

impl KmeansResult {
	/// Create an empty result, representing that no k-means trials were able to be run
	const fn empty() -> Self {
		Self {
			variance: 0.0,
			centroids: Vec::new(),
			counts: Vec::new(),
			iterations: 0,
		}
	}
}

/// Choose the starting centroids using the k-means++ algorithm
///
/// Stops early if every color is already a centroid,
/// so at most `min(k, colors.len())` distinct centroids are chosen.
fn kmeans_plus_plus(
	k: u8,
	rng: &mut impl Rng,
	colors: &[Point],
	centroids: &mut Vec<Point>,
	weights: &mut [f32],
	assignment: &mut [u8],
) {
	use rand::{
		distributions::{WeightedError::*, WeightedIndex},
		prelude::Distribution,
	};

	// Pick any random first centroid
	centroids.push(colors[rng.gen_range(0..colors.len())]);

	// Pick each next centroid with a weighted probability based off the squared distance to its closest centroid
	for i in 1..usize::from(k) {
		let centroid = centroids[i - 1];
		#[allow(clippy::cast_possible_truncation)]
		for ((weight, &color), center) in weights.iter_mut().zip(colors).zip(assignment.iter_mut()) {
			let dist = squared_distance(color, centroid);
			if dist < *weight {
				*weight = dist;
				*center = (i - 1) as u8;
			}
		}

		match WeightedIndex::new(&*weights) {
			Ok(sampler) => centroids.push(colors[sampler.sample(rng)]),
			Err(AllWeightsZero) => return, // all points exactly match a centroid
			Err(InvalidWeight | NoItem | TooMany) => {
				unreachable!("distances are >= 0 and colors.len() is in 1..=2.pow(24)")
			},
		}
	}
}

/// Initializes the center sums and counts based off the initial assignments
fn compute_initial_sums(data: &ColorCounts, centers: &mut CenterData, assignment: &[u8]) {
	for ((color, n), &center) in data.pairs().zip(assignment) {
		let i = usize::from(center);
		let nf = f64::from(n);
		let sum = &mut centers.sum[i];
		for c in 0..3 {
			sum[c] += nf * f64::from(color[c]);
		}
		centers.count[i] += n;
	}
}

/// For each pair of centers, update their distances and sort each center's row by increasing distance
// i and j are < centroids.len() <= u8::MAX
#[allow(clippy::cast_possible_truncation)]
fn update_distances(centroids: &[Point], distances: &mut [(u8, f32)]) {
	let k = centroids.len();
	for i in 0..k {
		let ci = centroids[i];
		distances[i * k + i] = (i as u8, 0.0);
		for j in (i + 1)..k {
			let cj = centroids[j];
			let dist = squared_distance(ci, cj) / 4.0;
			distances[j * k + i] = (i as u8, dist);
			distances[i * k + j] = (j as u8, dist);
		}
	}

	for row in distances[..(k * k)].chunks_exact_mut(k) {
		row.sort_by(|(_, x), (_, y)| f32::total_cmp(x, y));
	}
}

/// Find the nearest center for `color`, starting from its current center `center`
///
/// Each row of `distances` is sorted, so once the distance to the current center is
/// less than a quarter of the squared distance between the two centers, no further centers can be closer.
fn nearest_center(color: Point, center: u8, centroids: &[Point], distances: &[(u8, f32)]) -> u8 {
	let k = centroids.len();
	let ci = usize::from(center);
	let dist = squared_distance(color, centroids[ci]);

	let mut min_dist = dist;
	let mut min_center = center;
	for &(other_center, half_dist) in &distances[(ci * k + 1)..((ci + 1) * k)] {
		if dist < half_dist {
			break;
		}

		let other_dist = squared_distance(color, centroids[usize::from(other_center)]);
		if other_dist < min_dist {
			min_dist = other_dist;
			min_center = other_center;
		}
	}

	min_center
}

/// For each data point, update its assigned center
#[cfg(not(feature = "threads"))]
fn update_assignments(data: &ColorCounts, centers: &mut CenterData, distances: &[(u8, f32)], points: &mut PointData) {
	for ((color, n), center) in data.pairs().zip(&mut points.assignment) {
		let new_center = nearest_center(color, *center, &centers.centroid, distances);
		if new_center != *center {
			centers.transfer(color, n, usize::from(*center), usize::from(new_center));
			*center = new_center;
		}
	}
}

/// Number of points handled by each parallel task
///
/// A fixed chunk size keeps the order of floating point additions,
/// and therefore the result, independent of the number of threads.
#[cfg(feature = "threads")]
const CHUNK_SIZE: usize = 4096;

/// For each data point, update its assigned center
#[cfg(feature = "threads")]
fn update_assignments(data: &ColorCounts, centers: &mut CenterData, distances: &[(u8, f32)], points: &mut PointData) {
	use rayon::prelude::*;

	let k = centers.centroid.len();
	let centroids = &centers.centroid;

	let deltas = points
		.assignment
		.par_chunks_mut(CHUNK_SIZE)
		.zip(data.colors.par_chunks(CHUNK_SIZE))
		.zip(data.counts.par_chunks(CHUNK_SIZE))
		.map(|((assignment, colors), counts)| {
			let mut sums = vec![[0.0f64; 3]; k];
			let mut deltas = vec![0i64; k];

			for ((center, &color), &n) in assignment.iter_mut().zip(colors).zip(counts) {
				let new_center = nearest_center(color, *center, centroids, distances);

				// Move this point to its new center
				if new_center != *center {
					let (ci, cj) = (usize::from(*center), usize::from(new_center));
					let nf = f64::from(n);
					for c in 0..3 {
						let v = nf * f64::from(color[c]);
						sums[ci][c] -= v;
						sums[cj][c] += v;
					}
					deltas[ci] -= i64::from(n);
					deltas[cj] += i64::from(n);

					*center = new_center;
				}
			}

			(sums, deltas)
		})
		.collect::<Vec<_>>();

	for (delta_sums, delta_counts) in deltas {
		for (sum, delta_sum) in centers.sum.iter_mut().zip(&delta_sums) {
			for c in 0..3 {
				sum[c] += delta_sum[c];
			}
		}
		#[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
		for (count, &delta_count) in centers.count.iter_mut().zip(&delta_counts) {
			let new_count = i64::from(*count) + delta_count;
			// Each center count is the sum of the counts of its points,
			// so moving all points out of this center cannot give a negative value.
			debug_assert!(u32::try_from(new_count).is_ok());
			*count = new_count as u32;
		}
	}
}

/// Give each empty center the point that lies farthest from its own centroid
///
/// Only points that are not the last one in their center and that do not sit exactly
/// on their centroid are candidates, so no other center is emptied or duplicated.
fn reseed_empty_centers(data: &ColorCounts, centers: &mut CenterData, points: &mut PointData) {
	for empty in 0..centers.centroid.len() {
		if centers.count[empty] != 0 {
			continue;
		}

		let farthest = data
			.colors
			.iter()
			.zip(&points.assignment)
			.enumerate()
			.filter(|&(i, (_, &center))| centers.count[usize::from(center)] > data.counts[i])
			.map(|(i, (&color, &center))| (i, squared_distance(color, centers.centroid[usize::from(center)])))
			.filter(|&(_, dist)| dist > 0.0)
			.max_by(|(_, x), (_, y)| f32::total_cmp(x, y));

		let Some((i, _)) = farthest else {
			return;
		};

		let color = data.colors[i];
		let old = usize::from(points.assignment[i]);
		centers.transfer(color, data.counts[i], old, empty);
		centers.centroid[empty] = color;

		// empty < k <= u8::MAX
		#[allow(clippy::cast_possible_truncation)]
		{
			points.assignment[i] = empty as u8;
		}
	}
}

/// For each center, update its centroid using the vector sums and return the total movement
fn update_centroids(centers: &mut CenterData) -> f32 {
	let mut total_delta = 0.0;
	for ((centroid, &n), sum) in centers.centroid.iter_mut().zip(&centers.count).zip(&centers.sum) {
		if n == 0 {
			continue;
		}

		let n = f64::from(n);
		// Sums may need greater precision, but the average can fall back down to a reduced precision
		#[allow(clippy::cast_possible_truncation)]
		let new_centroid = [(sum[0] / n) as f32, (sum[1] / n) as f32, (sum[2] / n) as f32];

		total_delta += squared_distance(*centroid, new_centroid).sqrt();
		*centroid = new_centroid;
	}

	total_delta
}

/// Run a trial of sort k-means
fn kmeans(
	data: &ColorCounts,
	KmeansState { centers, distances, points }: &mut KmeansState,
	k: u8,
	max_iter: u32,
	convergence: f32,
	seed: u64,
) -> KmeansResult {
	let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
	kmeans_plus_plus(k, &mut rng, &data.colors, &mut centers.centroid, &mut points.weight, &mut points.assignment);
	compute_initial_sums(data, centers, &points.assignment);

	let mut iterations = 0;
	let mut total_delta = f32::INFINITY;
	while iterations < max_iter && total_delta > convergence {
		update_distances(&centers.centroid, distances);
		update_assignments(data, centers, distances, points);
		reseed_empty_centers(data, centers, points);
		total_delta = update_centroids(centers);
		iterations += 1;
	}

	let variance = data
		.pairs()
		.zip(&points.assignment)
		.map(|((color, n), &center)| {
			f64::from(n) * f64::from(squared_distance(color, centers.centroid[usize::from(center)]))
		})
		.sum();

	let (centroids, counts) = centers
		.centroid
		.iter()
		.zip(&centers.count)
		.filter(|&(_, &count)| count > 0)
		.map(|(&color, &count)| (color, count))
		.unzip();

	centers.reset();
	points.reset();

	KmeansResult { variance, centroids, counts, iterations }
}

/// Run multiple trials of k-means, taking the trial with the lowest variance
///
/// An empty result with no centroids is returned if `data` is empty, `trials` = 0, or `k` = 0.
/// Ties in variance keep the earliest trial.
#[must_use]
pub fn run(data: &ColorCounts, options: &KmeansOptions) -> KmeansResult {
	let KmeansOptions { trials, k, convergence_threshold, max_iter, seed } = *options;

	if k == 0 || data.colors.is_empty() {
		return KmeansResult::empty();
	}

	let mut state = KmeansState::new(k, data.num_colors());

	(0..trials)
		.map(|i| kmeans(data, &mut state, k, max_iter, convergence_threshold, seed ^ u64::from(i)))
		.reduce(|best, next| if next.variance < best.variance { next } else { best })
		.unwrap_or(KmeansResult::empty())
}

#[cfg(test)]
mod tests {
	use super::*;
	use approx::assert_relative_eq;

	fn assert_sums_eq(x: [f64; 3], y: [f64; 3]) {
		for c in 0..3 {
			assert_relative_eq!(x[c], y[c], epsilon = 1e-9);
		}
	}

	fn test_colors() -> Vec<Point> {
		vec![
			[12.0, 10.0, 14.0],
			[70.0, 78.0, 40.0],
			[20.0, 45.0, 52.0],
			[55.0, 56.0, 53.0],
			[15.0, 12.0, 17.0],
			[30.0, 12.0, 2.0],
			[110.0, 70.0, 10.0],
			[120.0, 25.0, 40.0],
			[90.0, 80.0, 12.0],
			[78.0, 92.0, 10.0],
			[40.0, 50.0, 140.0],
			[66.0, 66.0, 64.0],
		]
	}

	fn test_data() -> ColorCounts {
		ColorCounts {
			colors: test_colors(),
			counts: vec![12, 11, 10, 9, 8, 7, 6, 5, 4, 3, 2, 1],
		}
	}

	fn options(k: u8, convergence_threshold: f32, max_iter: u32) -> KmeansOptions {
		KmeansOptions {
			trials: 1,
			k,
			convergence_threshold,
			max_iter,
			seed: 0,
		}
	}

	#[test]
	fn from_samples_merges_duplicates() {
		let samples = [
			Srgb::new(1, 2, 3),
			Srgb::new(4, 5, 6),
			Srgb::new(1, 2, 3),
			Srgb::new(1, 2, 3),
		];
		let data = ColorCounts::from_samples(&samples);

		assert_eq!(data.colors, vec![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
		assert_eq!(data.counts, vec![3, 1]);
		assert_eq!(data.num_colors(), 2);
		assert_eq!(data.total_count(), 4);
	}

	fn kmeans_plus_plus_num_centroids(k: u8, n: u32) {
		let mut state = KmeansState::new(k, n);

		kmeans_plus_plus(
			k,
			&mut Xoshiro256PlusPlus::seed_from_u64(0),
			&test_colors()[..(n as usize)],
			&mut state.centers.centroid,
			&mut state.points.weight,
			&mut state.points.assignment,
		);

		assert_eq!(state.centers.centroid.len(), usize::min(usize::from(k), n as usize));
	}

	#[test]
	fn kmeans_plus_plus_k_greater_than_n() {
		kmeans_plus_plus_num_centroids(6, 2);
	}

	#[test]
	fn kmeans_plus_plus_k_equals_n() {
		kmeans_plus_plus_num_centroids(4, 4);
	}

	#[test]
	fn kmeans_plus_plus_k_less_than_n() {
		kmeans_plus_plus_num_centroids(2, 6);
	}

	#[test]
	fn update_distances_sorts_each_row() {
		let centroids = test_colors();
		let len = centroids.len();
		let mut distances = vec![(0, 0.0); len * len];

		update_distances(&centroids, &mut distances);

		#[allow(clippy::cast_possible_truncation)]
		for (i, row) in distances.chunks_exact(len).enumerate() {
			assert!(row[0] == (i as u8, 0.0));
			for j in 0..(len - 1) {
				assert!(row[j].1 <= row[j + 1].1);
			}
		}
	}

	fn initialize(k: u8) -> (ColorCounts, KmeansState) {
		let data = test_data();
		let mut state = KmeansState::new(k, data.num_colors());
		let mut rng = Xoshiro256PlusPlus::seed_from_u64(0);

		kmeans_plus_plus(
			k,
			&mut rng,
			&data.colors,
			&mut state.centers.centroid,
			&mut state.points.weight,
			&mut state.points.assignment,
		);

		compute_initial_sums(&data, &mut state.centers, &state.points.assignment);
		update_distances(&state.centers.centroid, &mut state.distances);

		(data, state)
	}

	fn center_sum(sums: &[[f64; 3]]) -> [f64; 3] {
		let mut total = [0.0; 3];
		for sum in sums {
			for c in 0..3 {
				total[c] += sum[c];
			}
		}
		total
	}

	#[test]
	fn compute_initial_sums_preserves_sum() {
		let (data, state) = initialize(4);

		let mut expected_sum = [0.0; 3];
		let mut expected_count = 0;
		for (color, count) in data.pairs() {
			expected_count += count;
			let n = f64::from(count);
			for c in 0..3 {
				expected_sum[c] += n * f64::from(color[c]);
			}
		}

		assert_eq!(expected_count, state.centers.count.iter().sum::<u32>());
		assert_sums_eq(expected_sum, center_sum(&state.centers.sum));
	}

	#[test]
	fn update_assignments_preserves_sum() {
		let (data, mut state) = initialize(4);

		let expected_sum = center_sum(&state.centers.sum);
		let expected_count = state.centers.count.iter().sum::<u32>();

		update_assignments(&data, &mut state.centers, &state.distances, &mut state.points);

		assert_eq!(expected_count, state.centers.count.iter().sum::<u32>());
		assert_sums_eq(expected_sum, center_sum(&state.centers.sum));
	}

	#[test]
	fn update_assignments_sum_reflects_assignment() {
		let (data, mut state) = initialize(4);

		update_assignments(&data, &mut state.centers, &state.distances, &mut state.points);

		for ((color, count), &center) in data.pairs().zip(&state.points.assignment) {
			let center = usize::from(center);
			let n = f64::from(count);
			let sum = &mut state.centers.sum[center];
			for c in 0..3 {
				sum[c] -= n * f64::from(color[c]);
			}
			state.centers.count[center] -= count;
		}

		for sum in &state.centers.sum {
			assert_sums_eq(*sum, [0.0; 3]);
		}

		for &count in &state.centers.count {
			assert_eq!(count, 0);
		}
	}

	#[test]
	fn update_assignments_picks_nearest_center() {
		let (data, mut state) = initialize(4);

		update_assignments(&data, &mut state.centers, &state.distances, &mut state.points);

		for (&color, &center) in data.colors.iter().zip(&state.points.assignment) {
			let assigned = squared_distance(color, state.centers.centroid[usize::from(center)]);
			for &other in &state.centers.centroid {
				assert!(assigned <= squared_distance(color, other));
			}
		}
	}

	#[test]
	fn update_centroids_total_delta() {
		let (data, mut state) = initialize(4);

		let old_centroids = state.centers.centroid.clone();

		update_assignments(&data, &mut state.centers, &state.distances, &mut state.points);

		let total_delta = update_centroids(&mut state.centers);

		let expected = old_centroids
			.iter()
			.zip(&state.centers.centroid)
			.map(|(&old, &new)| squared_distance(old, new).sqrt())
			.sum::<f32>();

		assert!((total_delta - expected).abs() <= 1e-4);
	}

	#[test]
	fn reseed_fills_empty_center() {
		let data = test_data();
		let mut state = KmeansState::new(2, data.num_colors());

		// Everything in center 0, center 1 empty
		state.centers.centroid = vec![[50.0, 50.0, 50.0], [50.0, 50.0, 50.0]];
		compute_initial_sums(&data, &mut state.centers, &state.points.assignment);

		reseed_empty_centers(&data, &mut state.centers, &mut state.points);

		assert!(state.centers.count[1] > 0);
		assert_eq!(state.centers.centroid[1], [40.0, 50.0, 140.0]);
		assert_eq!(state.points.assignment[10], 1);
		assert_eq!(state.centers.count.iter().sum::<u32>(), 78);
	}

	#[test]
	fn k_less_than_distinct_gives_k_centroids() {
		let data = test_data();
		for k in 1..=12 {
			let result = run(&data, &options(k, 0.01, 64));
			assert_eq!(result.centroids.len(), usize::from(k));
			assert_eq!(result.counts.iter().sum::<u32>(), 78);
		}
	}

	#[test]
	fn k_greater_than_distinct_shrinks() {
		let samples = [Srgb::new(255, 0, 0), Srgb::new(0, 255, 0), Srgb::new(0, 0, 255)].repeat(10);
		let data = ColorCounts::from_samples(&samples);

		let result = run(&data, &options(5, 0.01, 64));

		assert_eq!(result.centroids.len(), 3);
		assert_eq!(result.counts, vec![10, 10, 10]);
		assert_relative_eq!(result.variance, 0.0);
	}

	#[test]
	fn same_seed_same_result() {
		let data = test_data();
		let a = run(&data, &options(4, 0.01, 64));
		let b = run(&data, &options(4, 0.01, 64));

		assert_eq!(a.centroids, b.centroids);
		assert_eq!(a.counts, b.counts);
		assert_eq!(a.iterations, b.iterations);
	}

	#[test]
	fn more_trials_never_increase_variance() {
		let data = test_data();
		let one = run(&data, &options(3, 0.01, 64));
		let many = run(&data, &KmeansOptions { trials: 8, ..options(3, 0.01, 64) });

		assert!(many.variance <= one.variance);
	}

	#[test]
	fn max_iter_reached() {
		let data = test_data();

		let many_iter = 64;
		let converged = run(&data, &options(4, 0.01, many_iter));
		assert!(converged.iterations < many_iter);

		let result = run(&data, &options(4, 0.0, 1));
		assert_eq!(result.iterations, 1);
	}

	#[test]
	fn empty_input_or_zero_k_gives_empty_result() {
		let empty = ColorCounts { colors: Vec::new(), counts: Vec::new() };
		assert!(run(&empty, &options(4, 0.01, 64)).centroids.is_empty());
		assert!(run(&test_data(), &options(0, 0.01, 64)).centroids.is_empty());
		assert!(run(&test_data(), &KmeansOptions { trials: 0, ..options(4, 0.01, 64) }).centroids.is_empty());
	}
}
