use super::*;

/// Label returned when a query falls through every branch of an internal node.
pub const NO_MATCHING_PATH: &str = "Unknown (no matching path)";

/// Comparison applied by a threshold branch.
///
/// # Variants
///
/// - `LessOrEqual` - matches values `<= threshold` (the left side of a split)
/// - `Greater` - matches values `> threshold` (the right side of a split)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    LessOrEqual,
    Greater,
}

impl Comparison {
    /// Gets the operator text used in branch keys.
    ///
    /// # Returns
    ///
    /// * `&'static str` - `"<="` or `">"`
    pub fn symbol(self) -> &'static str {
        match self {
            Comparison::LessOrEqual => "<=",
            Comparison::Greater => ">",
        }
    }
}

/// Condition guarding the edge from an internal node to one of its children.
///
/// # Variants
///
/// - `Threshold` - numeric comparison of the feature value against `threshold`
/// - `Equals` - categorical match of the feature value against a category, ignoring ASCII case.
///   The builder never produces it; it exists for trees assembled by hand.
#[derive(Debug, Clone, PartialEq)]
pub enum BranchCondition {
    Threshold {
        comparison: Comparison,
        threshold: f64,
    },
    Equals(String),
}

impl BranchCondition {
    /// Creates the left-side condition of a split, `value <= threshold`.
    pub fn less_or_equal(threshold: f64) -> Self {
        BranchCondition::Threshold {
            comparison: Comparison::LessOrEqual,
            threshold,
        }
    }

    /// Creates the right-side condition of a split, `value > threshold`.
    pub fn greater(threshold: f64) -> Self {
        BranchCondition::Threshold {
            comparison: Comparison::Greater,
            threshold,
        }
    }

    /// Checks whether a feature value satisfies this condition.
    ///
    /// A categorical category matches the value rendered by [`format_value`]
    /// and, for integral values, the plain integer text as well, so both
    /// `"6"` and `"6.0"` match `6.0`.
    ///
    /// # Parameters
    ///
    /// * `value` - The record's value for the node's feature
    ///
    /// # Returns
    ///
    /// * `bool` - `true` if the branch should be followed
    pub fn matches(&self, value: f64) -> bool {
        match self {
            BranchCondition::Threshold {
                comparison: Comparison::LessOrEqual,
                threshold,
            } => value <= *threshold,
            BranchCondition::Threshold {
                comparison: Comparison::Greater,
                threshold,
            } => value > *threshold,
            BranchCondition::Equals(category) => {
                let category = category.trim();
                format_value(value).eq_ignore_ascii_case(category)
                    || (is_integral(value) && format!("{:.0}", value) == category)
            }
        }
    }

    /// Renders the branch key, e.g. `"N <= 50.0"`, `"N > 50.0"`, or the bare category.
    pub fn key(&self, feature: Feature) -> String {
        match self {
            BranchCondition::Threshold {
                comparison,
                threshold,
            } => format!(
                "{} {} {}",
                feature,
                comparison.symbol(),
                format_value(*threshold)
            ),
            BranchCondition::Equals(category) => category.clone(),
        }
    }

    pub fn threshold(&self) -> Option<f64> {
        match self {
            BranchCondition::Threshold { threshold, .. } => Some(*threshold),
            BranchCondition::Equals(_) => None,
        }
    }
}

/// Renders a number in plain decimal notation.
///
/// Integral values always carry one fractional digit (`50` becomes `50.0`,
/// `1e16` becomes `10000000000000000.0`); other values use the shortest digits
/// that round-trip. No exponent form is ever produced.
pub fn format_value(value: f64) -> String {
    if is_integral(value) {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}

fn is_integral(value: f64) -> bool {
    value.is_finite() && value.fract() == 0.0
}

/// An edge of the tree: a condition and the subtree it leads to.
#[derive(Debug, Clone, PartialEq)]
pub struct Branch {
    pub condition: BranchCondition,
    pub child: Node,
}

impl Branch {
    /// Creates an edge leading to `child` when `condition` holds.
    pub fn new(condition: BranchCondition, child: Node) -> Self {
        Self { condition, child }
    }
}

/// A node in the decision tree.
///
/// # Variants
///
/// - `Leaf` - A terminal node holding the predicted crop label.
/// - `Internal` - A decision node testing `feature`. Its `branches` are evaluated in
///   order and the first matching one is followed. Nodes built from data always
///   have exactly two branches, `feature <= threshold` then `feature > threshold`.
///
/// Every child is owned by exactly one parent.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Leaf {
        label: String,
    },
    Internal {
        feature: Feature,
        branches: Vec<Branch>,
    },
}

impl Node {
    /// Creates a leaf predicting `label`.
    pub fn leaf(label: impl Into<String>) -> Self {
        Node::Leaf {
            label: label.into(),
        }
    }

    /// Creates a decision node testing `feature`.
    ///
    /// # Parameters
    ///
    /// * `feature` - The feature whose value selects a branch
    /// * `branches` - Edges in evaluation order; the first matching one is followed
    pub fn internal(feature: Feature, branches: Vec<Branch>) -> Self {
        Node::Internal { feature, branches }
    }

    /// Whether this node is a leaf.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    /// Label of a leaf, `None` for internal nodes.
    pub fn label(&self) -> Option<&str> {
        match self {
            Node::Leaf { label } => Some(label.as_str()),
            Node::Internal { .. } => None,
        }
    }

    /// Feature tested by an internal node, `None` for leaves.
    pub fn feature(&self) -> Option<Feature> {
        match self {
            Node::Leaf { .. } => None,
            Node::Internal { feature, .. } => Some(*feature),
        }
    }

    /// Outgoing edges in evaluation order, empty for leaves.
    pub fn branches(&self) -> &[Branch] {
        match self {
            Node::Leaf { .. } => &[],
            Node::Internal { branches, .. } => branches.as_slice(),
        }
    }

    /// Split threshold of an internal node, taken from its first threshold branch.
    pub fn threshold(&self) -> Option<f64> {
        self.branches()
            .iter()
            .find_map(|branch| branch.condition.threshold())
    }

    /// Number of edges on the longest path from this node to a leaf.
    pub fn depth(&self) -> usize {
        self.branches()
            .iter()
            .map(|branch| branch.child.depth() + 1)
            .max()
            .unwrap_or(0)
    }

    pub fn node_count(&self) -> usize {
        1 + self
            .branches()
            .iter()
            .map(|branch| branch.child.node_count())
            .sum::<usize>()
    }

    pub fn leaf_count(&self) -> usize {
        match self {
            Node::Leaf { .. } => 1,
            Node::Internal { branches, .. } => {
                branches.iter().map(|branch| branch.child.leaf_count()).sum()
            }
        }
    }

    /// Walks the tree from this node and returns the label reached by `record`.
    ///
    /// At each internal node the first branch whose condition holds for the
    /// record's value is followed. When no branch holds, [`NO_MATCHING_PATH`] is
    /// returned instead of an error.
    ///
    /// # Parameters
    ///
    /// * `record` - The query sample
    ///
    /// # Returns
    ///
    /// * `Result<&str, ModelError>` - The predicted label or [`NO_MATCHING_PATH`]
    ///
    /// # Errors
    ///
    /// * `ModelError::MissingFeature` if the record lacks a feature tested on its path
    pub fn predict<'a>(&'a self, record: &Record) -> Result<&'a str, ModelError> {
        let mut current = self;

        loop {
            match current {
                Node::Leaf { label } => return Ok(label.as_str()),
                Node::Internal { feature, branches } => {
                    let value = record.value(*feature)?;
                    match branches
                        .iter()
                        .find(|branch| branch.condition.matches(value))
                    {
                        Some(branch) => current = &branch.child,
                        None => {
                            warn!(
                                "No branch of `{}` matches value {}",
                                feature,
                                format_value(value)
                            );
                            return Ok(NO_MATCHING_PATH);
                        }
                    }
                }
            }
        }
    }

    /// Renders the subtree as a depth-indented listing.
    ///
    /// Internal nodes produce one `"<feature> = <branch key>:"` line per branch,
    /// followed by the branch's subtree indented by two more spaces. Leaves
    /// produce `"Label: <label>"`.
    ///
    /// # Example
    /// ```rust
    /// use croptree::dataset::Feature;
    /// use croptree::machine_learning::{Branch, BranchCondition, Node};
    ///
    /// let tree = Node::internal(
    ///     Feature::N,
    ///     vec![
    ///         Branch::new(BranchCondition::less_or_equal(50.0), Node::leaf("rice")),
    ///         Branch::new(BranchCondition::greater(50.0), Node::leaf("maize")),
    ///     ],
    /// );
    /// assert_eq!(
    ///     tree.render(),
    ///     "N = N <= 50.0:\n  Label: rice\nN = N > 50.0:\n  Label: maize\n"
    /// );
    /// ```
    pub fn render(&self) -> String {
        let mut output = String::new();
        self.render_into("", &mut output);
        output
    }

    fn render_into(&self, indent: &str, output: &mut String) {
        match self {
            Node::Leaf { label } => {
                output.push_str(&format!("{}Label: {}\n", indent, label));
            }
            Node::Internal { feature, branches } => {
                let child_indent = format!("{}  ", indent);
                for branch in branches {
                    output.push_str(&format!(
                        "{}{} = {}:\n",
                        indent,
                        feature,
                        branch.condition.key(*feature)
                    ));
                    branch.child.render_into(&child_indent, output);
                }
            }
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Hyperparameters for ID3 tree induction.
///
/// # Fields
///
/// - `features` - Candidate features in tie-break order. Each is used at most once per root-to-leaf path.
/// - `parallel` - Evaluate the information gain of the candidate features with rayon.
///   The chosen feature is the same as in sequential mode.
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionTreeParams {
    pub features: FeatureSet,
    pub parallel: bool,
}

/// Default hyperparameters: all seven crop features in declared order, sequential evaluation.
impl Default for DecisionTreeParams {
    fn default() -> Self {
        Self {
            features: FeatureSet::default(),
            parallel: false,
        }
    }
}

/// ID3-style decision tree classifier for crop records.
///
/// At each node the feature with the highest information gain (computed over
/// the partition of its exact values) is chosen, the node is split in two at
/// the mean of that feature's values, and both sides are grown recursively
/// without the chosen feature. Growth stops when a node is pure or no features
/// remain, in which case the majority label is used.
///
/// # Fields
///
/// - `params` - Hyperparameters controlling tree induction
/// - `root` - The root node of the trained tree, or `None` if not yet fitted
///
/// # Example
/// ```rust
/// use croptree::dataset::Record;
/// use croptree::machine_learning::DecisionTree;
///
/// let records = vec![
///     Record::from_values([10.0, 20.0, 10.0, 25.0, 80.0, 6.5, 200.0], "rice"),
///     Record::from_values([90.0, 40.0, 40.0, 20.0, 50.0, 7.0, 80.0], "maize"),
/// ];
///
/// let mut tree = DecisionTree::default();
/// tree.fit(&records).unwrap();
///
/// assert_eq!(tree.predict_one(&records[0]).unwrap(), "rice");
/// assert_eq!(tree.predict_one(&records[1]).unwrap(), "maize");
/// println!("{}", tree.generate_tree_structure().unwrap());
/// ```
#[derive(Debug, Clone, Default)]
pub struct DecisionTree {
    params: DecisionTreeParams,
    root: Option<Node>,
}

impl DecisionTree {
    /// Creates a new untrained decision tree.
    ///
    /// # Parameters
    ///
    /// - `params` - Optional hyperparameters. If `None`, default parameters are used.
    ///
    /// # Returns
    ///
    /// * `DecisionTree` - A new untrained `DecisionTree` instance.
    pub fn new(params: Option<DecisionTreeParams>) -> Self {
        Self {
            params: params.unwrap_or_default(),
            root: None,
        }
    }

    // Getters
    get_field_as_ref!(get_root, root, Option<&Node>);

    pub fn get_parameters(&self) -> &DecisionTreeParams {
        &self.params
    }

    /// Trains the decision tree on the provided records, replacing any previous tree.
    ///
    /// # Parameters
    ///
    /// - `records` - Labeled training samples
    ///
    /// # Returns
    ///
    /// * `Result<&mut Self, ModelError>` - A mutable reference to `self` for method chaining, or a `ModelError` if training fails.
    ///
    /// # Errors
    ///
    /// - `ModelError::EmptyDataset` if `records` is empty
    /// - `ModelError::MissingFeature` if a record lacks a candidate feature needed for a split
    pub fn fit(&mut self, records: &[Record]) -> Result<&mut Self, ModelError> {
        let root = self.build(records)?;

        info!(
            "Fitted decision tree on {} records: {} nodes, {} leaves, depth {}",
            records.len(),
            root.node_count(),
            root.leaf_count(),
            root.depth()
        );

        self.root = Some(root);
        Ok(self)
    }

    /// Builds a tree from `records` without storing it.
    ///
    /// Building is deterministic: the same records in the same order always
    /// produce the same tree.
    ///
    /// # Errors
    ///
    /// - `ModelError::EmptyDataset` if `records` is empty
    /// - `ModelError::MissingFeature` if a record lacks a candidate feature needed for a split
    pub fn build(&self, records: &[Record]) -> Result<Node, ModelError> {
        let records: Vec<&Record> = records.iter().collect();
        self.build_from_refs(&records)
    }

    pub(crate) fn build_from_refs(&self, records: &[&Record]) -> Result<Node, ModelError> {
        if records.is_empty() {
            return Err(ModelError::EmptyDataset);
        }
        self.grow(records, &self.params.features, 0)
    }

    /// Recursively builds a node from the records that reached it.
    fn grow(
        &self,
        records: &[&Record],
        features: &FeatureSet,
        depth: usize,
    ) -> Result<Node, ModelError> {
        let first_label = records[0].label();
        if records.iter().all(|record| record.label() == first_label) {
            return Ok(Node::leaf(first_label));
        }

        if features.is_empty() {
            let label = majority_label(records);
            debug!(
                "depth {}: no features left for {} records, majority label `{}`",
                depth,
                records.len(),
                label
            );
            return Ok(Node::leaf(label));
        }

        let labels: Array1<&str> = records.iter().map(|record| record.label()).collect();
        let (feature, gain, values) = self.choose_best_feature(records, &labels, features)?;
        let threshold = mean(&values).ok_or(ModelError::EmptyDataset)?;

        debug!(
            "depth {}: split {} records on `{}` (gain {:.4}) at {}",
            depth,
            records.len(),
            feature,
            gain,
            format_value(threshold)
        );

        let mut left = Vec::with_capacity(records.len());
        let mut right = Vec::with_capacity(records.len());
        for (&record, &value) in records.iter().zip(values.iter()) {
            if value <= threshold {
                left.push(record);
            } else {
                right.push(record);
            }
        }

        let remaining = features.without(feature);
        let left_child = self.grow_side(records, &left, &remaining, depth)?;
        let right_child = self.grow_side(records, &right, &remaining, depth)?;

        Ok(Node::internal(
            feature,
            vec![
                Branch::new(BranchCondition::less_or_equal(threshold), left_child),
                Branch::new(BranchCondition::greater(threshold), right_child),
            ],
        ))
    }

    /// Grows one side of a split; an empty side becomes a leaf with the parent's majority label.
    fn grow_side(
        &self,
        parent: &[&Record],
        side: &[&Record],
        features: &FeatureSet,
        depth: usize,
    ) -> Result<Node, ModelError> {
        if side.is_empty() {
            let label = majority_label(parent);
            debug!(
                "depth {}: empty side of split, parent majority label `{}`",
                depth + 1,
                label
            );
            return Ok(Node::leaf(label));
        }
        self.grow(side, features, depth + 1)
    }

    /// Finds the feature with the highest information gain.
    ///
    /// Ties go to the feature listed first in `features`.
    fn choose_best_feature(
        &self,
        records: &[&Record],
        labels: &Array1<&str>,
        features: &FeatureSet,
    ) -> Result<(Feature, f64, Array1<f64>), ModelError> {
        let evaluate = |feature: Feature| -> Result<(f64, Array1<f64>), ModelError> {
            let values = feature_values(records, feature)?;
            let gain = information_gain(labels, &values);
            Ok((gain, values))
        };

        // Both paths keep the candidates in feature-set order
        let candidates: Vec<(f64, Array1<f64>)> = if self.params.parallel {
            features
                .as_slice()
                .par_iter()
                .map(|&feature| evaluate(feature))
                .collect::<Result<_, _>>()?
        } else {
            features.iter().map(evaluate).collect::<Result<_, _>>()?
        };

        let mut best: Option<(Feature, f64, Array1<f64>)> = None;
        for (feature, (gain, values)) in features.iter().zip(candidates) {
            let is_better = match &best {
                Some((_, best_gain, _)) => gain > *best_gain,
                None => true,
            };
            if is_better {
                best = Some((feature, gain, values));
            }
        }

        best.ok_or_else(|| {
            ModelError::InputValidationError("No candidate features to split on".to_string())
        })
    }

    /// Predicts the label of a single record.
    ///
    /// # Parameters
    ///
    /// * `record` - The query sample; its label is ignored
    ///
    /// # Returns
    ///
    /// * `Result<String, ModelError>` - The predicted label, or [`NO_MATCHING_PATH`] when the record falls through every branch
    ///
    /// # Errors
    ///
    /// * `ModelError::NotFitted` if the tree has not been trained
    /// * `ModelError::MissingFeature` if the record lacks a feature tested on its path
    pub fn predict_one(&self, record: &Record) -> Result<String, ModelError> {
        let root = self.root.as_ref().ok_or(ModelError::NotFitted)?;
        root.predict(record).map(str::to_string)
    }

    /// Predicts labels for multiple records using parallel processing.
    ///
    /// # Returns
    ///
    /// * `Result<Vec<String>, ModelError>` - Predicted labels in the order of `records`
    pub fn predict(&self, records: &[Record]) -> Result<Vec<String>, ModelError> {
        let root = self.root.as_ref().ok_or(ModelError::NotFitted)?;

        records
            .par_iter()
            .map(|record| root.predict(record).map(str::to_string))
            .collect()
    }

    /// Trains the tree on training records and immediately predicts the test records.
    pub fn fit_predict(
        &mut self,
        train: &[Record],
        test: &[Record],
    ) -> Result<Vec<String>, ModelError> {
        self.fit(train)?;
        self.predict(test)
    }

    /// Generates the depth-indented text listing of the trained tree.
    ///
    /// # Returns
    ///
    /// * `Result<String, ModelError>` - The rendering described in [`Node::render`], or `ModelError::NotFitted`
    pub fn generate_tree_structure(&self) -> Result<String, ModelError> {
        self.root
            .as_ref()
            .map(Node::render)
            .ok_or(ModelError::NotFitted)
    }
}

/// Builds a tree from `records` using the candidate features in `features`.
///
/// # Errors
///
/// - `ModelError::EmptyDataset` if `records` is empty
/// - `ModelError::MissingFeature` if a record lacks a candidate feature needed for a split
pub fn build_tree(records: &[Record], features: &FeatureSet) -> Result<Node, ModelError> {
    DecisionTree::new(Some(DecisionTreeParams {
        features: features.clone(),
        parallel: false,
    }))
    .build(records)
}

/// Predicts the label of `record` by walking the tree rooted at `root`.
///
/// See [`Node::predict`].
pub fn predict<'a>(root: &'a Node, record: &Record) -> Result<&'a str, ModelError> {
    root.predict(record)
}

/// Most frequent label; on equal counts the label seen first in `records` wins.
fn majority_label<'a>(records: &[&'a Record]) -> &'a str {
    let mut counts: Vec<(&'a str, usize)> = Vec::new();
    for record in records {
        match counts.iter_mut().find(|(label, _)| *label == record.label()) {
            Some((_, count)) => *count += 1,
            None => counts.push((record.label(), 1)),
        }
    }

    let mut best: Option<(&'a str, usize)> = None;
    for (label, count) in counts {
        if best.is_none_or(|(_, best_count)| count > best_count) {
            best = Some((label, count));
        }
    }

    best.map(|(label, _)| label).unwrap_or_default()
}

fn feature_values(records: &[&Record], feature: Feature) -> Result<Array1<f64>, ModelError> {
    records
        .iter()
        .map(|record| record.value(feature))
        .collect::<Result<Vec<f64>, ModelError>>()
        .map(Array1::from_vec)
}
