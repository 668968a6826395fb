use burn::{
    nn::{Linear, LinearConfig},
    prelude::*,
    tensor::activation::relu,
};

/// Which job a tabular network was trained for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TabularTask {
    /// One logit per class; prediction is the argmax
    Classification,
    /// A single output unit read as-is
    Regression,
}

// NOTE: #[derive(Config)] already generates Clone and Serialize/Deserialize
// internally — do NOT add them again or you get conflicting impls.
#[derive(Config, Debug)]
pub struct TabularNetConfig {
    pub task:       TabularTask,
    pub input_dim:  usize,
    pub hidden_dim: usize,
    pub output_dim: usize,
}

impl TabularNetConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> TabularNet<B> {
        TabularNet {
            hidden: LinearConfig::new(self.input_dim, self.hidden_dim).init(device),
            output: LinearConfig::new(self.hidden_dim, self.output_dim).init(device),
            input_dim:  self.input_dim,
            output_dim: self.output_dim,
        }
    }
}

/// One hidden ReLU layer over a scaled feature row.
#[derive(Module, Debug)]
pub struct TabularNet<B: Backend> {
    pub hidden:     Linear<B>,
    pub output:     Linear<B>,
    pub input_dim:  usize,
    pub output_dim: usize,
}

impl<B: Backend> TabularNet<B> {
    /// rows: [batch, input_dim] → [batch, output_dim]
    pub fn forward(&self, rows: Tensor<B, 2>) -> Tensor<B, 2> {
        let x = relu(self.hidden.forward(rows));
        self.output.forward(x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type TestBackend = burn::backend::NdArray;

    #[test]
    fn test_forward_shape() {
        let device = burn::backend::ndarray::NdArrayDevice::default();
        let model: TabularNet<TestBackend> =
            TabularNetConfig::new(TabularTask::Classification, 7, 16, 22).init(&device);

        let rows = Tensor::<TestBackend, 2>::zeros([3, 7], &device);
        assert_eq!(model.forward(rows).dims(), [3, 22]);
    }
}
